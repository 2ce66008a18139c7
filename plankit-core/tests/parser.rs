use plankit_core::{
    parse_plan, CallableMetadata, ExecutionSettings, InputValue, ParameterMetadata, ParserConfig,
    PlanError, PlanFormatError, StaticRegistry, StepKind,
};

fn registry() -> StaticRegistry {
    StaticRegistry::new()
        .with(CallableMetadata::new("Math", "Add"))
        .with(
            CallableMetadata::new("WriterPlugin", "Translate")
                .with_description("Translate text")
                .with_parameter(ParameterMetadata::new("input"))
                .with_parameter(ParameterMetadata::new("language").with_default("English"))
                .with_parameter(ParameterMetadata::new("tone").with_default("neutral")),
        )
        .with(
            CallableMetadata::new("SummarizePlugin", "Summarize")
                .with_execution_settings(ExecutionSettings::for_service("fast"))
                .with_execution_settings(ExecutionSettings::default()),
        )
}

fn inputs_of(step: &plankit_core::Step) -> Vec<(&str, String)> {
    step.inputs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_raw()))
        .collect()
}

#[test]
fn end_to_end_single_call_step() {
    let text = r#"<goal>g</goal><plan><function.Math.Add x="1" y="2" setContextVariable="sum"/></plan>"#;
    let plan = parse_plan(text, "g", &registry(), &ParserConfig::default()).unwrap();

    assert_eq!(plan.goal(), "g");
    assert_eq!(plan.steps().len(), 1);
    let step = &plan.steps()[0];
    assert_eq!(step.kind, StepKind::Call);
    assert_eq!(step.namespace, "Math");
    assert_eq!(step.name, "Add");
    assert_eq!(inputs_of(step), vec![("x", "1".to_string()), ("y", "2".to_string())]);
    assert_eq!(step.outputs, ["sum"]);
    assert!(step.contributes_to_result.is_empty());
    assert!(plan.result_outputs().is_empty());
}

#[test]
fn explicit_attributes_keep_declaration_order() {
    let text = r#"<plan><function.Math.Add zeta="z" alpha="a"/></plan>"#;
    let plan = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap();

    let step = &plan.steps()[0];
    assert_eq!(inputs_of(step), vec![("zeta", "z".to_string()), ("alpha", "a".to_string())]);
    assert!(step.outputs.is_empty());
}

#[test]
fn prefixed_attributes_are_used_verbatim_as_input_keys() {
    let text = r#"<plan xmlns:ext="urn:ext"><function.Math.Add xml:lang="en" ext:mode="fast"/></plan>"#;
    let plan = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap();

    let step = &plan.steps()[0];
    assert_eq!(
        inputs_of(step),
        vec![("xml:lang", "en".to_string()), ("ext:mode", "fast".to_string())]
    );
}

#[test]
fn input_keys_match_parameters_ignoring_case() {
    let text = r#"<plan><function.WriterPlugin.Translate LANGUAGE="French"/></plan>"#;
    let plan = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap();

    let step = &plan.steps()[0];
    assert_eq!(
        inputs_of(step),
        vec![("language", "French".to_string()), ("tone", "neutral".to_string())]
    );
}

#[test]
fn defaults_are_seeded_then_overlaid() {
    let text = r#"<plan><function.WriterPlugin.Translate input="$poem" tone="formal" extra="x"/></plan>"#;
    let plan = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap();

    let step = &plan.steps()[0];
    assert_eq!(
        inputs_of(step),
        vec![
            ("language", "English".to_string()),
            ("tone", "formal".to_string()),
            ("input", "$poem".to_string()),
            ("extra", "x".to_string()),
        ]
    );
    assert_eq!(step.inputs["input"], InputValue::Variable("poem".to_string()));
    assert_eq!(step.description, "Translate text");
}

#[test]
fn result_outputs_accumulate_across_steps_in_order() {
    let text = r#"
<plan>
  <function.Math.Add appendToResult="first" x="1"/>
  <function.Math.Add setContextVariable="tmp" APPENDTORESULT="second"/>
  <function.Math.Add setContextVariable="only_var"/>
</plan>"#;
    let plan = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap();

    assert_eq!(plan.steps().len(), 3);
    assert_eq!(plan.steps()[0].outputs, ["first"]);
    assert_eq!(plan.steps()[0].contributes_to_result, ["first"]);
    assert_eq!(inputs_of(&plan.steps()[0]), vec![("x", "1".to_string())]);
    assert_eq!(plan.steps()[1].outputs, ["tmp", "second"]);
    assert_eq!(plan.steps()[1].contributes_to_result, ["second"]);
    assert!(plan.steps()[2].contributes_to_result.is_empty());
    assert_eq!(plan.result_outputs(), ["first", "second"]);
}

#[test]
fn missing_closing_tag_recovers_like_closed_text() {
    let closed = r#"<plan><function.Math.Add x="1"/><function.Math.Add y="2"/></plan>"#;
    let open = r#"<plan><function.Math.Add x="1"/><function.Math.Add y="2"/>"#;

    let expected = parse_plan(closed, "goal", &registry(), &ParserConfig::default()).unwrap();
    let recovered = parse_plan(open, "goal", &registry(), &ParserConfig::default()).unwrap();
    assert_eq!(recovered, expected);
    assert_eq!(recovered.steps().len(), 2);
}

#[test]
fn goal_element_survives_recovery_of_unclosed_plan() {
    let closed = r#"<goal> add &amp; sum </goal><plan><function.Math.Add x="1"/></plan>"#;
    let open = r#"<goal> add &amp; sum </goal><plan><function.Math.Add x="1"/>"#;

    let expected = parse_plan(closed, "", &registry(), &ParserConfig::default()).unwrap();
    let recovered = parse_plan(open, "", &registry(), &ParserConfig::default()).unwrap();
    assert_eq!(expected.goal(), "add & sum");
    assert_eq!(recovered, expected);

    let recovered = parse_plan(open, "explicit", &registry(), &ParserConfig::default()).unwrap();
    assert_eq!(recovered.goal(), "explicit");
}

#[test]
fn surrounding_prose_is_salvaged() {
    let text = r#"Sure & here you go:
<plan>
  <!-- add them -->
  <function.Math.Add x="1" y="2" appendToResult="RESULT"/>
</plan>
Good luck!"#;
    let plan = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap();
    assert_eq!(plan.steps().len(), 1);
    assert_eq!(plan.result_outputs(), ["RESULT"]);
}

#[test]
fn call_tag_without_function_name_is_a_format_error() {
    for text in ["<plan><function.Add/></plan>", "<plan><function.Math./></plan>"] {
        for allow_missing in [false, true] {
            let config = ParserConfig::default().allow_missing(allow_missing);
            let err = parse_plan(text, "goal", &registry(), &config).unwrap_err();
            assert!(
                matches!(err, PlanError::Format(PlanFormatError::InvalidCallTag { .. })),
                "{text} allow_missing={allow_missing}: {err}"
            );
        }
    }
}

#[test]
fn missing_callable_fails_without_tolerance() {
    let text = r#"<plan><function.Math.Add/><function.Nope.Missing a="1"/></plan>"#;
    let err = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap_err();
    match err {
        PlanError::MissingCallable(e) => {
            assert_eq!(e.namespace, "Nope");
            assert_eq!(e.name, "Missing");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_callable_becomes_placeholder_when_allowed() {
    let text = r#"
<plan>
  <function.Math.Add x="1" setContextVariable="a"/>
  <function.Nope.Missing a="1" setContextVariable="b" appendToResult="c"/>
  <function.Math.Add y="2" appendToResult="d"/>
</plan>"#;
    let config = ParserConfig::default().allow_missing(true);
    let plan = parse_plan(text, "goal", &registry(), &config).unwrap();

    assert_eq!(plan.steps().len(), 3);
    let placeholder = &plan.steps()[1];
    assert!(placeholder.missing);
    assert_eq!(placeholder.qualified_name(), "Nope.Missing");
    assert!(placeholder.inputs.is_empty());
    assert!(placeholder.outputs.is_empty());
    assert_eq!(plan.steps()[0].outputs, ["a"]);
    assert_eq!(plan.steps()[2].outputs, ["d"]);
    assert_eq!(plan.result_outputs(), ["d"]);
    assert_eq!(plan.missing_steps().count(), 1);
}

#[test]
fn text_comments_and_other_elements_are_skipped() {
    let text = r#"<plan>
  First add.
  <!-- comment -->
  <note>not a step</note>
  <function.Math.Add x="1"/>
  <empty/>
</plan>"#;
    let plan = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap();
    assert_eq!(plan.steps().len(), 1);
    assert!(plan.steps()[0].is_call());
}

#[test]
fn text_can_be_captured_as_steps() {
    let text = "<plan>\n  First add.\n  <function.Math.Add x=\"1\"/>\n</plan>";
    let config = ParserConfig::default().capture_text(true);
    let plan = parse_plan(text, "goal", &registry(), &config).unwrap();

    assert_eq!(plan.steps().len(), 2);
    assert_eq!(plan.steps()[0].kind, StepKind::Text);
    assert_eq!(plan.steps()[0].description, "First add.");
    assert_eq!(plan.steps()[1].kind, StepKind::Call);
}

#[test]
fn call_prefix_is_case_insensitive() {
    let text = r#"<plan><FUNCTION.Math.Add x="1"/></plan>"#;
    let plan = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap();
    assert_eq!(plan.steps()[0].name, "Add");
}

#[test]
fn every_solution_element_contributes_steps() {
    let text = r#"<plan><function.Math.Add x="1"/></plan><other><plan><function.Math.Add x="2"/></plan></other>"#;
    let plan = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap();

    let xs: Vec<String> = plan.steps().iter().map(|s| s.inputs["x"].as_raw()).collect();
    assert_eq!(xs, ["1", "2"]);
    let ids: Vec<usize> = plan.steps().iter().map(|s| s.id.0).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn unrecoverable_text_is_a_format_error() {
    let err = parse_plan("no plan here <", "goal", &registry(), &ParserConfig::default())
        .unwrap_err();
    match err {
        PlanError::Format(e) => {
            assert!(matches!(e, PlanFormatError::Markup { .. }));
            assert_eq!(e.text(), Some("no plan here <"));
            assert_eq!(e.recovered(), None);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn recovered_region_that_still_fails_reports_both_texts() {
    let text = r#"<plan><function.Math.Add x="1"></plan>"#;
    let err = parse_plan(text, "goal", &registry(), &ParserConfig::default()).unwrap_err();
    match err {
        PlanError::Format(e) => {
            assert!(matches!(e, PlanFormatError::Recovered { .. }));
            assert_eq!(e.text(), Some(text));
            assert_eq!(e.recovered(), Some(text));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn prose_without_markup_is_an_empty_plan() {
    let plan = parse_plan("I cannot help with that.", "goal", &registry(), &ParserConfig::default())
        .unwrap();
    assert!(plan.is_empty());
    assert!(plan.result_outputs().is_empty());
}

#[test]
fn blank_goal_falls_back_to_goal_element() {
    let text = r#"<goal> Add numbers </goal><plan><function.Math.Add/></plan>"#;
    let plan = parse_plan(text, "", &registry(), &ParserConfig::default()).unwrap();
    assert_eq!(plan.goal(), "Add numbers");

    let plan = parse_plan(text, "explicit", &registry(), &ParserConfig::default()).unwrap();
    assert_eq!(plan.goal(), "explicit");
}

#[test]
fn closure_resolver_is_accepted() {
    let resolver = |namespace: &str, name: &str| {
        (namespace == "Echo").then(|| CallableMetadata::new(namespace, name))
    };
    let text = r#"<plan><function.Echo.Say text="hi"/></plan>"#;
    let plan = parse_plan(text, "goal", &resolver, &ParserConfig::default()).unwrap();
    assert_eq!(plan.steps()[0].qualified_name(), "Echo.Say");
}

#[test]
fn custom_vocabulary_is_honoured() {
    let config = ParserConfig {
        solution_tag: "solution".to_string(),
        call_prefix: "call.".to_string(),
        set_variable_attribute: "out".to_string(),
        append_to_result_attribute: "result".to_string(),
        ..ParserConfig::default()
    };
    let text = r#"<solution><call.Math.Add x="1" out="a" result="b"/><function.Math.Add/></solution>"#;
    let plan = parse_plan(text, "goal", &registry(), &config).unwrap();

    assert_eq!(plan.steps().len(), 1);
    assert_eq!(plan.steps()[0].outputs, ["a", "b"]);
    assert_eq!(plan.result_outputs(), ["b"]);
}

#[test]
fn steps_inherit_execution_settings_and_root_step_mirrors_plan() {
    let text = r#"<plan><function.SummarizePlugin.Summarize appendToResult="summary"/></plan>"#;
    let plan = parse_plan(text, "sum up", &registry(), &ParserConfig::default()).unwrap();

    let step = &plan.steps()[0];
    assert_eq!(step.execution_settings.len(), 2);
    assert_eq!(step.execution_settings[0].service_id(), Some("fast"));

    let root = plan.to_root_step();
    assert_eq!(root.kind, StepKind::Goal);
    assert_eq!(root.description, "sum up");
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.outputs, ["summary"]);

    let restored = plankit_core::Plan::from_json(&plan.to_json().unwrap()).unwrap();
    assert_eq!(restored, plan);
}
