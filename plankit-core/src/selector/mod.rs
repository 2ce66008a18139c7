mod provider;

pub use provider::{ModelService, ServiceProvider, ServiceRegistry};

use crate::error::SelectionError;
use crate::types::ExecutionSettings;

/// The chosen backend and the configuration that selected it.
///
/// `settings` is `None` only when the function declared no configurations at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'c, T> {
    pub service: T,
    pub settings: Option<&'c ExecutionSettings>,
}

pub trait ServiceSelector {
    fn select<'c, T, P>(
        &self,
        candidates: &'c [ExecutionSettings],
        provider: &P,
    ) -> Result<Selection<'c, T>, SelectionError>
    where
        T: ModelService,
        P: ServiceProvider<T> + ?Sized;
}

/// Picks the first candidate, in order, whose target is registered.
///
/// A candidate with a service id matches a keyed registration. Otherwise a candidate with a model
/// id matches the first registered instance reporting that model. The first candidate with
/// neither id is the fallback and pairs with the default instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedServiceSelector;

impl ServiceSelector for OrderedServiceSelector {
    fn select<'c, T, P>(
        &self,
        candidates: &'c [ExecutionSettings],
        provider: &P,
    ) -> Result<Selection<'c, T>, SelectionError>
    where
        T: ModelService,
        P: ServiceProvider<T> + ?Sized,
    {
        if candidates.is_empty() {
            return match provider.get_default() {
                Some(service) => Ok(Selection {
                    service,
                    settings: None,
                }),
                None => Err(no_backend::<T>(candidates)),
            };
        }

        let mut default_settings: Option<&ExecutionSettings> = None;
        for (index, settings) in candidates.iter().enumerate() {
            if let Some(service_id) = settings.service_id() {
                if let Some(service) = provider.get_keyed(service_id) {
                    tracing::debug!(index, service_id, "selected backend by service id");
                    return Ok(Selection {
                        service,
                        settings: Some(settings),
                    });
                }
            } else if let Some(model_id) = settings.model_id() {
                if let Some(service) = find_by_model_id(provider, model_id) {
                    tracing::debug!(index, model_id, "selected backend by model id");
                    return Ok(Selection {
                        service,
                        settings: Some(settings),
                    });
                }
            } else if default_settings.is_none() {
                default_settings = Some(settings);
            }
        }

        if let Some(settings) = default_settings {
            if let Some(service) = provider.get_default() {
                tracing::debug!("no targeted backend registered; using the default backend");
                return Ok(Selection {
                    service,
                    settings: Some(settings),
                });
            }
        }

        Err(no_backend::<T>(candidates))
    }
}

/// Selects with [`OrderedServiceSelector`].
pub fn select_service<'c, T, P>(
    candidates: &'c [ExecutionSettings],
    provider: &P,
) -> Result<Selection<'c, T>, SelectionError>
where
    T: ModelService,
    P: ServiceProvider<T> + ?Sized,
{
    OrderedServiceSelector.select(candidates, provider)
}

fn find_by_model_id<T, P>(provider: &P, model_id: &str) -> Option<T>
where
    T: ModelService,
    P: ServiceProvider<T> + ?Sized,
{
    provider
        .get_all()
        .into_iter()
        .find(|s| s.model_id().is_some_and(|id| !id.is_empty() && id == model_id))
}

fn no_backend<T>(candidates: &[ExecutionSettings]) -> SelectionError {
    SelectionError::NoBackendAvailable {
        capability: std::any::type_name::<T>().to_string(),
        service_ids: candidates
            .iter()
            .filter_map(|c| c.service_id())
            .map(str::to_string)
            .collect(),
    }
}
