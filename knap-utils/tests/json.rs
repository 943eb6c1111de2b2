use knap_challenges::knapsack::{Instance, Item, Solution};
use knap_utils::*;
use serde_json::json;
use std::{env, fs};

#[test]
fn test_jsonify_sorts_keys() {
    let value = json!({"b": 1, "a": {"d": [{"z": 0, "y": 1}], "c": 2}});
    assert_eq!(
        jsonify(&value).unwrap(),
        r#"{"a":{"c":2,"d":[{"y":1,"z":0}]},"b":1}"#
    );
}

#[test]
fn test_jsonify_solution() {
    let solution = Solution::new(11, Some(vec![true, true, false]));
    assert_eq!(
        jsonify(&solution).unwrap(),
        r#"{"selection":[true,true,false],"value":11}"#
    );
    let value_only = Solution::new(11, None);
    assert_eq!(
        jsonify(&value_only).unwrap(),
        r#"{"selection":null,"value":11}"#
    );
}

#[test]
fn test_compress_decompress() {
    let instance = Instance::new(9, vec![Item::new(4, 5), Item::new(5, 6)]);
    let compressed = compress_obj(&instance).unwrap();
    let restored: Instance = decompress_obj(&compressed).unwrap();
    assert_eq!(restored, instance);
    assert!(decompress_obj::<Instance>(b"not zlib").is_err());
}

#[test]
fn test_load_json_arg_inline() {
    let solution: Solution = load_json_arg(r#"{"value": 3, "selection": [true]}"#).unwrap();
    assert_eq!(solution, Solution::new(3, Some(vec![true])));
    assert!(load_json_arg::<Solution>("{not json").is_err());
}

#[test]
fn test_load_json_arg_file() {
    let path = env::temp_dir().join(format!("knap-utils-test-{}.json", std::process::id()));
    fs::write(&path, r#"{"value": 0, "selection": []}"#).unwrap();
    let solution: Solution = load_json_arg(path.to_str().unwrap()).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(solution, Solution::new(0, Some(vec![])));

    assert!(load_json_arg::<Solution>("/definitely/missing/file.json").is_err());
}
