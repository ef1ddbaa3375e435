use airpack::steps::analytic::{DeployedModel, LocalModel};
use airpack::steps::feedback::{BinaryFeedback, QualitativeFeedback, SimpleFeedback};
use airpack::steps::harvesting::{ImageHarvester, QueryParameterHarvester, TextHarvester};
use airpack::steps::postprocessing::{
    BinaryClassification, MulticlassClassification, ObjectDetection, Regression,
};
use airpack::steps::preprocessing::{
    ImagePreprocessor, ImageStep, TabularPreprocessor, TabularStep, TextPreprocessor, TextStep,
};
use airpack::steps::rendering::{DocumentRendering, ImageRendering, WordRendering};
use airpack::{Error, Step};
use serde_json::{Value, json};

fn field_of(err: Error) -> String {
    match err {
        Error::Validation { field, .. } => field,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_text_harvester_modes() {
    let dict = TextHarvester::all().body_only(true).to_dict().unwrap();
    assert_eq!(dict.class_name, "TextHarvester");
    assert_eq!(
        Value::Object(dict.params),
        json!({ "how": "all", "regex": null, "limit": null, "bodyOnly": true })
    );

    let regex = TextHarvester::new("regex", Some("[A-Z]{3}")).unwrap();
    assert_eq!(regex.params()["regex"], "[A-Z]{3}");

    assert_eq!(field_of(TextHarvester::new("regex", None).unwrap_err()), "regex");
    assert_eq!(field_of(TextHarvester::new("some", None).unwrap_err()), "how");
    assert_eq!(field_of(TextHarvester::all().with_limit(0).unwrap_err()), "limit");
}

#[test]
fn test_image_harvester_requires_pattern_for_match_modes() {
    let src = ImageHarvester::new("src_match", Some("cdn.example.com")).unwrap();
    assert_eq!(src.params()["srcMatch"], "cdn.example.com");
    assert_eq!(src.params()["altMatch"], json!(null));

    assert_eq!(field_of(ImageHarvester::new("alt_match", None).unwrap_err()), "pattern");
    assert!(ImageHarvester::new("all", None).unwrap().with_min_size(0, 10).is_err());
}

#[test]
fn test_query_parameter_harvester_wraps_lists() {
    let harvester = QueryParameterHarvester::new(["q", "page"])
        .unwrap()
        .with_additional(["lang"])
        .unwrap();
    assert_eq!(
        harvester.params(),
        json!({ "params": ["q", "page"], "additionalParams": ["lang"] })
    );

    let bare = QueryParameterHarvester::new(["id"]).unwrap();
    assert_eq!(bare.params()["additionalParams"], json!([]));
}

#[test]
fn test_preprocessors_serialize_their_steps_in_order() {
    let text = TextPreprocessor::new(vec![
        TextStep::ConvertToCase { lowercase: true },
        TextStep::Tokenize {
            split_sentences: false,
            split_words: true,
        },
        TextStep::vocabulary(["the", "cat"]),
        TextStep::pad(16),
    ])
    .unwrap();

    let params = text.params();
    let steps = params["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0]["className"], "ConvertToCase");
    assert_eq!(steps[2]["params"]["oovCharacter"], 2);
    assert_eq!(steps[3]["params"]["padLocation"], "end");
}

#[test]
fn test_preprocessor_steps_are_validated_on_assignment() {
    let bad_pad = TextStep::PadSequences {
        pad_character: 0,
        length: 8,
        pad_location: "middle".to_string(),
        truncate_location: "end".to_string(),
    };
    assert_eq!(field_of(TextPreprocessor::new(vec![bad_pad]).unwrap_err()), "pad_location");

    let mut image = ImagePreprocessor::default();
    image.add_step(ImageStep::resize(224, 224)).unwrap();
    let err = image.add_step(ImageStep::DivideValue { value: 0.0 }).unwrap_err();
    assert_eq!(field_of(err), "value");
    assert_eq!(image.steps().len(), 1);
}

#[test]
fn test_analytics_validate_input_type_and_secret() {
    assert_eq!(field_of(LocalModel::new("m.h5", "audio").unwrap_err()), "input_type");
    assert_eq!(
        field_of(DeployedModel::new("https://x/predict", "text", "header", None).unwrap_err()),
        "header"
    );

    let deployed = DeployedModel::new("https://x/predict", "text", "header", Some("X-Key")).unwrap();
    assert_eq!(deployed.to_dict().unwrap().class_name, "DeployedModel");
    assert_eq!(deployed.params()["header"], "X-Key");
}

#[test]
fn test_postprocessing_ranges() {
    assert!(BinaryClassification::new(["neg", "pos"], 0.5).is_ok());
    assert_eq!(
        field_of(BinaryClassification::new(["neg", "pos"], 1.5).unwrap_err()),
        "threshold"
    );
    assert_eq!(
        field_of(BinaryClassification::new(["only"], 0.5).unwrap_err()),
        "label_map"
    );
    assert!(MulticlassClassification::new(Vec::<String>::new()).is_err());
    assert_eq!(field_of(Regression::new(Some(10.0), Some(1.0), false).unwrap_err()), "max");
    assert_eq!(field_of(Regression::new(Some(1.0), None, false).unwrap_err()), "min");
}

#[test]
fn test_renderers() {
    let word = WordRendering::new("circle", "red")
        .unwrap()
        .with_highlight("yellow")
        .unwrap()
        .with_words(["urgent"]);
    assert_eq!(word.params()["badgeShape"], "circle");
    assert_eq!(word.params()["words"], json!(["urgent"]));

    assert_eq!(field_of(WordRendering::new("hexagon", "red").unwrap_err()), "badge_shape");
    assert_eq!(field_of(DocumentRendering::new("center", "red", true).unwrap_err()), "position");
    assert_eq!(field_of(ImageRendering::new("red", 0, "top").unwrap_err()), "thickness");
}

#[test]
fn test_feedback_defaults_are_per_instance() {
    let first = QualitativeFeedback::new(["Was this helpful?"]).unwrap();
    let second = QualitativeFeedback::new(["Anything missing?"])
        .unwrap()
        .with_choices(["yes", "no"])
        .unwrap();

    assert_eq!(first.params()["choices"], json!([]));
    assert_eq!(second.params()["choices"], json!(["yes", "no"]));
    assert_eq!(SimpleFeedback.params(), json!({}));
    assert!(BinaryFeedback::new(["a", "b", "c"]).is_err());
}

#[test]
fn test_non_finite_numbers_are_rejected() {
    assert_eq!(
        field_of(BinaryClassification::new(["neg", "pos"], f64::NAN).unwrap_err()),
        "threshold"
    );
    assert_eq!(
        field_of(ObjectDetection::new(["car"], f64::NAN).unwrap_err()),
        "threshold"
    );
    assert_eq!(field_of(Regression::new(Some(f64::NAN), Some(1.0), false).unwrap_err()), "min");
    assert_eq!(
        field_of(Regression::new(Some(0.0), Some(f64::INFINITY), false).unwrap_err()),
        "max"
    );

    let z_score = TabularStep::ZScore {
        column: 0,
        mean: 0.0,
        std: f64::NAN,
    };
    assert_eq!(field_of(TabularPreprocessor::new(vec![z_score]).unwrap_err()), "std");
    let min_max = TabularStep::MinMax {
        column: 1,
        min: f64::NAN,
        max: 1.0,
    };
    assert_eq!(field_of(TabularPreprocessor::new(vec![min_max]).unwrap_err()), "min");

    let mut image = ImagePreprocessor::default();
    let err = image.add_step(ImageStep::MultiplyValue { value: f64::NAN }).unwrap_err();
    assert_eq!(field_of(err), "value");
    assert!(image.steps().is_empty());
}

#[test]
fn test_preprocessing_steps_serialize_only_inside_their_preprocessor() {
    let tabular = TabularPreprocessor::new(vec![
        TabularStep::ZScore {
            column: 0,
            mean: 4.2,
            std: 1.5,
        },
        TabularStep::DropColumn { column: 3 },
    ])
    .unwrap();

    let dict = tabular.to_dict().unwrap();
    assert_eq!(dict.class_name, "TabularPreprocessor");
    assert_eq!(
        Value::Object(dict.params),
        json!({ "steps": [
            { "className": "ZScore", "params": { "column": 0, "mean": 4.2, "std": 1.5 } },
            { "className": "DropColumn", "params": { "column": 3 } },
        ]})
    );
}

#[test]
fn test_renderer_colours() {
    assert!(DocumentRendering::new("top", "#ff8800", false).is_ok());
    assert!(ImageRendering::new("#0f0", 2, "bottom").is_ok());
    assert_eq!(
        field_of(DocumentRendering::new("top", "ff8800", false).unwrap_err()),
        "badge_color"
    );
    assert_eq!(
        field_of(WordRendering::default().with_highlight("#12345").unwrap_err()),
        "highlight_color"
    );
    assert_eq!(field_of(ImageRendering::new("", 2, "top").unwrap_err()), "color");
}
