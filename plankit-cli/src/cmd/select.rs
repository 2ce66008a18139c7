use plankit_core::{
    select_service, CallableResolver, ExecutionSettings, Selection, ServiceRegistry,
};
use serde::Serialize;

use crate::cmd::config::{self, ServiceEntry};
use crate::exit_codes;
use crate::output::{print_error, print_json, OutputFormat};
use crate::{OutputArgs, SelectArgs};

#[derive(Serialize)]
struct SelectResult<'a> {
    service: &'a ServiceEntry,
    settings: Option<&'a ExecutionSettings>,
}

pub fn select_cmd(args: &SelectArgs, output: &OutputArgs) -> i32 {
    let Some(services) = config::load_services(&args.services, output) else {
        return exit_codes::RUNTIME_ERROR;
    };
    let Some(candidates) = load_candidates(args, output) else {
        return exit_codes::RUNTIME_ERROR;
    };

    let mut registry = ServiceRegistry::new();
    for entry in services {
        match entry.service_id.clone() {
            Some(id) => registry.register_keyed(id, entry),
            None => registry.register(entry),
        };
    }

    let selection: Selection<'_, ServiceEntry> = match select_service(&candidates, &registry) {
        Ok(s) => s,
        Err(e) => return print_error(output, exit_codes::PLAN_FAILED, &e.to_string()),
    };

    match output.format {
        OutputFormat::Json => print_json(
            output.quiet,
            &SelectResult {
                service: &selection.service,
                settings: selection.settings,
            },
        ),
        OutputFormat::Text => {
            if !output.quiet {
                print_text(&selection);
            }
        }
    }
    exit_codes::SUCCESS
}

fn load_candidates(args: &SelectArgs, output: &OutputArgs) -> Option<Vec<ExecutionSettings>> {
    if let Some(path) = &args.settings {
        return config::load_settings(path, output);
    }

    let (Some(function), Some(functions)) = (&args.function, &args.functions) else {
        return Some(Vec::new());
    };
    let registry = config::load_registry(functions, output)?;
    let (namespace, name) = function.rsplit_once('.').unwrap_or(("", function.as_str()));
    match registry.resolve(namespace, name) {
        Some(callable) => Some(callable.execution_settings),
        None => {
            print_error(
                output,
                exit_codes::RUNTIME_ERROR,
                &format!("function '{function}' not found in {}", functions.display()),
            );
            None
        }
    }
}

fn print_text(selection: &Selection<'_, ServiceEntry>) {
    let service = &selection.service;
    let label = service
        .name
        .as_deref()
        .or(service.service_id.as_deref())
        .unwrap_or("<unnamed>");
    println!("service: {label}");
    if let Some(id) = &service.service_id {
        println!("service id: {id}");
    }
    if let Some(model) = &service.model_id {
        println!("model id: {model}");
    }
    match selection.settings {
        None => println!("settings: none"),
        Some(settings) => match serde_json::to_string(settings) {
            Ok(json) => println!("settings: {json}"),
            Err(e) => eprintln!("error: failed to serialize settings: {e}"),
        },
    }
}
