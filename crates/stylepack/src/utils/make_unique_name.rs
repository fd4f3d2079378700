use rustc_hash::FxHashMap;

/// Returns `name`, or `name` followed by the smallest counter (starting at 2) not used yet.
pub fn make_unique_name(name: &str, used: &mut FxHashMap<String, u32>) -> String {
  let Some(&last) = used.get(name) else {
    used.insert(name.to_string(), 1);
    return name.to_string();
  };

  let mut count = last;
  loop {
    count += 1;
    let candidate = format!("{name}{count}");
    if !used.contains_key(&candidate) {
      used.insert(name.to_string(), count);
      used.insert(candidate.clone(), 1);
      return candidate;
    }
  }
}

#[test]
fn test_make_unique_name() {
  let mut used = FxHashMap::default();
  assert_eq!(make_unique_name("index", &mut used), "index");
  assert_eq!(make_unique_name("index2", &mut used), "index2");
  assert_eq!(make_unique_name("index", &mut used), "index3");
  assert_eq!(make_unique_name("index", &mut used), "index4");
}
