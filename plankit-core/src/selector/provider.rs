use std::rc::Rc;
use std::sync::Arc;

/// A backend instance that can report which model it serves.
pub trait ModelService {
    fn model_id(&self) -> Option<&str>;
}

impl<S: ModelService + ?Sized> ModelService for &S {
    fn model_id(&self) -> Option<&str> {
        (**self).model_id()
    }
}

impl<S: ModelService + ?Sized> ModelService for Box<S> {
    fn model_id(&self) -> Option<&str> {
        (**self).model_id()
    }
}

impl<S: ModelService + ?Sized> ModelService for Arc<S> {
    fn model_id(&self) -> Option<&str> {
        (**self).model_id()
    }
}

impl<S: ModelService + ?Sized> ModelService for Rc<S> {
    fn model_id(&self) -> Option<&str> {
        (**self).model_id()
    }
}

/// Lookups the selector performs against the application's service container.
pub trait ServiceProvider<T> {
    /// The instance registered under `key`.
    fn get_keyed(&self, key: &str) -> Option<T>;

    /// Every registered instance, in registration order.
    fn get_all(&self) -> Vec<T>;

    /// The instance returned for an unkeyed lookup.
    fn get_default(&self) -> Option<T>;
}

#[derive(Debug, Clone)]
struct Registration<T> {
    service_id: Option<String>,
    instance: T,
}

/// In-memory service container.
///
/// Unkeyed lookups return the most recently registered unkeyed instance, so a later registration
/// replaces an earlier one as the default without removing it from [`ServiceProvider::get_all`].
#[derive(Debug, Clone)]
pub struct ServiceRegistry<T> {
    registrations: Vec<Registration<T>>,
}

impl<T> Default for ServiceRegistry<T> {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }
}

impl<T> ServiceRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, instance: T) -> &mut Self {
        self.registrations.push(Registration {
            service_id: None,
            instance,
        });
        self
    }

    pub fn register_keyed(&mut self, service_id: impl Into<String>, instance: T) -> &mut Self {
        self.registrations.push(Registration {
            service_id: Some(service_id.into()),
            instance,
        });
        self
    }

    pub fn with(mut self, instance: T) -> Self {
        self.register(instance);
        self
    }

    pub fn with_keyed(mut self, service_id: impl Into<String>, instance: T) -> Self {
        self.register_keyed(service_id, instance);
        self
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Registered service ids, in registration order.
    pub fn service_ids(&self) -> impl Iterator<Item = &str> {
        self.registrations
            .iter()
            .filter_map(|r| r.service_id.as_deref())
    }
}

impl<T: Clone> ServiceProvider<T> for ServiceRegistry<T> {
    fn get_keyed(&self, key: &str) -> Option<T> {
        self.registrations
            .iter()
            .rev()
            .find(|r| r.service_id.as_deref() == Some(key))
            .map(|r| r.instance.clone())
    }

    fn get_all(&self) -> Vec<T> {
        self.registrations
            .iter()
            .map(|r| r.instance.clone())
            .collect()
    }

    fn get_default(&self) -> Option<T> {
        self.registrations
            .iter()
            .rev()
            .find(|r| r.service_id.is_none())
            .map(|r| r.instance.clone())
    }
}
