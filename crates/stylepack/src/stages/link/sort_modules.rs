use rustc_hash::{FxHashMap, FxHashSet};

use super::LinkStage;
use crate::types::module_idx::ModuleIdx;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
enum Status {
  ToBeExecuted(ModuleIdx),
  WaitForExit(ModuleIdx),
}

impl LinkStage {
  /// Modules reachable from `entry` in execution order: a depth-first post-order walk following
  /// import statements in source order.
  pub(super) fn sort_modules(&mut self, entry: ModuleIdx) -> Vec<ModuleIdx> {
    let mut execution_stack = vec![Status::ToBeExecuted(entry)];

    let mut executed_ids = FxHashSet::default();
    let mut stack_indexes_of_executing_id = FxHashMap::default();
    let mut sorted_modules = vec![];

    while let Some(status) = execution_stack.pop() {
      match status {
        Status::ToBeExecuted(id) => {
          if executed_ids.contains(&id) {
            // Still executing means `id` imports itself through the current chain
            if let Some(index) = stack_indexes_of_executing_id.get(&id).copied() {
              let cycle = execution_stack[index..]
                .iter()
                .filter_map(|action| match action {
                  Status::ToBeExecuted(_) => None,
                  Status::WaitForExit(id) => Some(*id),
                })
                .chain(std::iter::once(id))
                .collect::<Box<[_]>>();
              self.circular_dependencies.insert(cycle);
            }
          } else {
            executed_ids.insert(id);
            execution_stack.push(Status::WaitForExit(id));
            stack_indexes_of_executing_id.insert(id, execution_stack.len() - 1);

            execution_stack
              .extend(self.modules[id].dependencies.iter().rev().copied().map(Status::ToBeExecuted));
          }
        }
        Status::WaitForExit(id) => {
          sorted_modules.push(id);
          stack_indexes_of_executing_id.remove(&id);
        }
      }
    }

    sorted_modules
  }
}
