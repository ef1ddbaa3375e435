use airpack::compiler::loader;
use airpack::{ConfigBuilder, Dependencies, Stage, StepDict};
use serde_json::json;
use std::fs;

#[test]
fn test_load_yaml_graph_definition() {
    let yaml_content = r#"
name: "Demo"
stage: "staging"
version: "0.3"
owner: "nlp"
autoRun: true
nodes:
  - step:
      className: "TextHarvester"
      params:
        how: "all"
  - step:
      className: "WordRendering"
      params: {}
    dependencies: 0
  - step:
      className: "SimpleFeedback"
    dependencies: [0, 1]
"#;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("graph.yaml");
    fs::write(&file_path, yaml_content).expect("Failed to write temp file");

    let loaded = loader::load_graph(&file_path).expect("Failed to load graph definition");

    let mut expected = ConfigBuilder::new("Demo")
        .stage(Stage::Staging)
        .version("0.3")
        .owner("nlp")
        .auto_run(true)
        .build()
        .unwrap();
    let harvester = StepDict::new("TextHarvester", json!({ "how": "all" })).unwrap();
    let renderer = StepDict::new("WordRendering", json!({})).unwrap();
    expected.add_node(&harvester, None).unwrap();
    expected.add_node(&renderer, Some(Dependencies::One(0))).unwrap();
    expected.add_node(
        &StepDict::new("SimpleFeedback", json!({})).unwrap(),
        Some(Dependencies::Many(vec![0, 1])),
    ).unwrap();

    assert_eq!(loaded, expected);

    temp_dir.close().expect("Failed to close temp dir");
}

#[test]
fn test_load_json_graph_definition() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("graph.json");
    fs::write(
        &file_path,
        r#"{"name": "json-graph", "nodes": [{"step": {"className": "LocalModel", "params": {"path": "m.bin"}}}]}"#,
    )
    .unwrap();

    let graph = loader::load_graph(&file_path).unwrap();
    assert_eq!(graph.metadata().stage, Stage::Experimental);
    assert_eq!(graph.get_filenames().len(), 1);
}

#[test]
fn test_load_rejects_bad_dependencies_and_names() {
    let temp_dir = tempfile::tempdir().unwrap();

    let bad_deps = temp_dir.path().join("bad_deps.yaml");
    fs::write(
        &bad_deps,
        "name: x\nnodes:\n  - step: {className: Trim}\n    dependencies: \"first\"\n",
    )
    .unwrap();
    assert!(loader::load_graph(&bad_deps).is_err());

    let empty_name = temp_dir.path().join("empty_name.yaml");
    fs::write(&empty_name, "name: \"\"\n").unwrap();
    let err = loader::load_graph(&empty_name).unwrap_err();
    assert!(err.root_cause().to_string().contains("name"));

    assert!(loader::load_graph(&temp_dir.path().join("absent.yaml")).is_err());
}

#[test]
fn test_load_rejects_non_mapping_params() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("scalar_params.yaml");
    fs::write(
        &file_path,
        "name: x\nnodes:\n  - step:\n      className: Trim\n      params: 5\n",
    )
    .unwrap();

    assert!(loader::load_graph(&file_path).is_err());
}
