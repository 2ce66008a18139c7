use plankit_core::{parse_plan, Plan, PlanError, Step, StepKind};

use crate::cmd::config;
use crate::exit_codes;
use crate::output::{print_error, print_json, OutputFormat};
use crate::{OutputArgs, ParseArgs};

pub fn parse_cmd(args: &ParseArgs, output: &OutputArgs) -> i32 {
    let Some(text) = config::read_file(&args.path, "plan", output) else {
        return exit_codes::RUNTIME_ERROR;
    };
    let Some(registry) = config::load_registry(&args.functions, output) else {
        return exit_codes::RUNTIME_ERROR;
    };
    let Some(mut parser_config) = config::load_parser_config(args.config.as_deref(), output) else {
        return exit_codes::RUNTIME_ERROR;
    };
    if args.allow_missing {
        parser_config.allow_missing = true;
    }

    let plan = match parse_plan(&text, &args.goal, &registry, &parser_config) {
        Ok(p) => p,
        Err(e) => return print_error(output, exit_codes::PLAN_FAILED, &describe_error(&e)),
    };

    match output.format {
        OutputFormat::Json => print_json(output.quiet, &plan),
        OutputFormat::Text => {
            if !output.quiet {
                print_text(&plan);
            }
        }
    }
    exit_codes::SUCCESS
}

fn describe_error(err: &PlanError) -> String {
    match err {
        PlanError::Format(e) => match e.recovered() {
            Some(recovered) => format!("{e}\nrecovered region:\n{recovered}"),
            None => format!("{e}"),
        },
        PlanError::MissingCallable(e) => {
            format!("{e} (re-run with --allow-missing to keep it as a placeholder)")
        }
    }
}

fn print_text(plan: &Plan) {
    println!("goal: {}", plan.goal());
    println!("steps: {}", plan.steps().len());
    for step in plan.steps() {
        print_step(step);
    }
    if !plan.result_outputs().is_empty() {
        println!("result: {}", plan.result_outputs().join(", "));
    }
}

fn print_step(step: &Step) {
    match step.kind {
        StepKind::Text => println!("- {} text: {}", step.id, step.description),
        StepKind::Goal => println!("- {} goal: {}", step.id, step.description),
        StepKind::Call => {
            let marker = if step.missing { " (missing)" } else { "" };
            println!("- {} call: {}{marker}", step.id, step.qualified_name());
            for (name, value) in &step.inputs {
                println!("  input {name} = {value}");
            }
            if !step.outputs.is_empty() {
                println!("  outputs: {}", step.outputs.join(", "));
            }
            if !step.contributes_to_result.is_empty() {
                println!("  appends to result: {}", step.contributes_to_result.join(", "));
            }
        }
    }
}
