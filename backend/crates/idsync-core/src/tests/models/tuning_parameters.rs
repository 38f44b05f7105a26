use crate::TuningParameters;

use googletest::prelude::*;
use serde_json::{Map, json};

#[googletest::test]
fn given_empty_metadata_when_parsed_then_all_defaults() {
    let tuning = TuningParameters::from_metadata(&Map::new());

    expect_that!(tuning.min_endpointing_delay, eq(0.5));
    expect_that!(tuning.max_endpointing_delay, eq(6.0));
    expect_that!(tuning.min_speech_duration, eq(0.05));
    expect_that!(tuning.min_silence_duration, eq(0.55));
    expect_that!(tuning.prefix_padding_duration, eq(0.5));
    expect_that!(tuning.max_buffered_speech, eq(60.0));
    expect_that!(tuning.activation_threshold, eq(0.5));
}

#[googletest::test]
fn given_partial_metadata_when_parsed_then_defaults_fill_the_rest() {
    let metadata = json!({
        "min_endpointing_delay": 1.25,
        "activation_threshold": "0.8",
        "max_buffered_speech": "lots",
    });

    let tuning = TuningParameters::from_metadata(metadata.as_object().unwrap());

    expect_that!(tuning.min_endpointing_delay, eq(1.25));
    expect_that!(tuning.activation_threshold, eq(0.8));
    expect_that!(tuning.max_buffered_speech, eq(60.0));
    expect_that!(tuning.max_endpointing_delay, eq(6.0));
}
