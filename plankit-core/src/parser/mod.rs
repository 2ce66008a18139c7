mod markup;
mod salvage;

use roxmltree::{Document, Node};

use crate::binding::{bind_step, ReservedAttributes};
use crate::config::ParserConfig;
use crate::error::{MissingCallableError, PlanError, PlanFormatError};
use crate::registry::CallableResolver;
use crate::types::{Plan, PlanBuilder, Step};

/// Parses plan text into a [`Plan`].
///
/// The text is first parsed strictly as a markup fragment. If that fails, the first solution
/// region is salvaged from the text and parsed once more; a second failure is final.
///
/// An empty `goal` is replaced by the text of the first goal element, when there is one.
pub fn parse_plan<R>(
    text: &str,
    goal: &str,
    resolver: &R,
    config: &ParserConfig,
) -> Result<Plan, PlanError>
where
    R: CallableResolver + ?Sized,
{
    let wrapped = markup::wrap_fragment(text);
    let err = match markup::parse_fragment(&wrapped) {
        Ok(doc) => return build_plan(&doc, goal, resolver, config),
        Err(e) => e,
    };

    let Some(recovered) = salvage::recover_solution(text, &config.solution_tag) else {
        return Err(PlanFormatError::Markup {
            text: text.to_string(),
            source: err,
        }
        .into());
    };
    tracing::warn!(error = %err, "plan markup is malformed; parsing the recovered solution region");

    // A goal element outside the solution region is not part of the recovered text.
    let fallback_goal = if goal.trim().is_empty() {
        recover_goal(text, &config.goal_tag)
    } else {
        None
    };
    let goal = fallback_goal.as_deref().unwrap_or(goal);

    let wrapped = markup::wrap_fragment(&recovered);
    match markup::parse_fragment(&wrapped) {
        Ok(doc) => build_plan(&doc, goal, resolver, config),
        Err(source) => Err(PlanFormatError::Recovered {
            text: text.to_string(),
            recovered,
            source,
        }
        .into()),
    }
}

fn recover_goal(text: &str, tag: &str) -> Option<String> {
    let wrapped = markup::wrap_fragment(salvage::find_element(text, tag)?);
    let doc = markup::parse_fragment(&wrapped).ok()?;
    let node = markup::elements_named(&doc, tag).next()?;
    Some(markup::text_content(node).trim().to_string())
}

fn build_plan<R>(
    doc: &Document<'_>,
    goal: &str,
    resolver: &R,
    config: &ParserConfig,
) -> Result<Plan, PlanError>
where
    R: CallableResolver + ?Sized,
{
    let mut plan = PlanBuilder::new(goal);
    if goal.trim().is_empty() {
        if let Some(node) = markup::elements_named(doc, &config.goal_tag).next() {
            plan.set_goal(markup::text_content(node).trim());
        }
    }

    for solution in markup::elements_named(doc, &config.solution_tag) {
        for child in solution.children() {
            if child.is_text() {
                if config.capture_text {
                    let text = child.text().unwrap_or_default().trim();
                    if !text.is_empty() {
                        let id = plan.next_id();
                        plan.push(Step::text(id, text));
                    }
                }
                continue;
            }
            if !child.is_element() {
                continue;
            }

            let tag_name = child.tag_name();
            let tag = tag_name.name();
            let Some(qualified) = strip_prefix_ignore_case(tag, &config.call_prefix) else {
                // Empty or unrecognised elements are not steps.
                continue;
            };
            let (namespace, name) = split_callable_name(qualified)
                .ok_or_else(|| PlanFormatError::InvalidCallTag { tag: tag.to_string() })?;

            let step = build_call_step(&mut plan, child, namespace, name, resolver, config)?;
            plan.push(step);
        }
    }

    Ok(plan.build())
}

fn build_call_step<R>(
    plan: &mut PlanBuilder,
    node: Node<'_, '_>,
    namespace: &str,
    name: &str,
    resolver: &R,
    config: &ParserConfig,
) -> Result<Step, PlanError>
where
    R: CallableResolver + ?Sized,
{
    let Some(callable) = resolver.resolve(namespace, name) else {
        if config.allow_missing {
            tracing::debug!(namespace, name, "callable not found; adding placeholder step");
            return Ok(Step::placeholder(plan.next_id(), namespace, name));
        }
        return Err(MissingCallableError {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
        .into());
    };

    let attributes = markup::attribute_pairs(node);
    let bindings = bind_step(
        &callable.parameters,
        attributes.iter().map(|(k, v)| (&**k, *v)),
        ReservedAttributes::from_config(config),
    );

    let mut step = Step::call(plan.next_id(), namespace, name);
    step.description = callable.description;
    step.inputs = bindings.inputs;
    step.outputs = bindings.outputs;
    step.contributes_to_result = bindings.contributes_to_result;
    step.execution_settings = callable.execution_settings;
    Ok(step)
}

fn strip_prefix_ignore_case<'a>(tag: &'a str, prefix: &str) -> Option<&'a str> {
    let head = tag.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &tag[prefix.len()..])
}

/// Splits `namespace.name` at the last dot. The name must be non-empty; the namespace may be.
fn split_callable_name(qualified: &str) -> Option<(&str, &str)> {
    let (namespace, name) = qualified.rsplit_once('.')?;
    (!name.is_empty()).then_some((namespace, name))
}
