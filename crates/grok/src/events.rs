//! Object event subscriptions.

use crate::error::GrokError;
use crate::site::Site;
use grok_domain::interface::{Interface, TypeRef};
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// An object events are raised for.
pub trait Subject: fmt::Debug + Send + Sync {
    fn type_ref(&self) -> TypeRef;

    fn as_any(&self) -> &dyn Any;

    fn as_site(&self) -> Option<&dyn Site> {
        None
    }
}

/// An event raised for a subject, e.g. `IObjectAddedEvent` for an object just added to a container.
#[derive(Debug, Clone, Copy)]
pub struct Notification<'a> {
    pub subject: &'a dyn Subject,
    pub event: &'a Interface,
}

#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&Notification<'_>) -> Result<(), GrokError> + Send + Sync>);

impl Handler {
    pub fn new<F>(handle: F) -> Self
    where
        F: Fn(&Notification<'_>) -> Result<(), GrokError> + Send + Sync + 'static,
    {
        Self(Arc::new(handle))
    }

    /// # Errors
    /// Whatever the handler returns.
    pub fn call(&self, notification: &Notification<'_>) -> Result<(), GrokError> {
        (self.0)(notification)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

#[derive(Debug)]
struct Subscription {
    adapts: Vec<TypeRef>,
    handler: Handler,
}

impl Subscription {
    /// `(subject, event)` pairs match positionally; the base interface matches anything.
    fn matches(&self, required: &[TypeRef; 2]) -> bool {
        let wildcard = TypeRef::Interface(Interface::BASE);
        self.adapts.len() == required.len()
            && self.adapts.iter().zip(required).all(|(have, want)| have == want || *have == wildcard)
    }
}

#[derive(Debug, Default)]
pub struct EventDispatcher {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl EventDispatcher {
    pub fn subscribe(&self, handler: Handler, adapts: Vec<TypeRef>) {
        self.subscriptions.write().push(Subscription { adapts, handler });
    }

    /// Invokes every matching handler in subscription order; returns how many ran.
    ///
    /// Handlers run without the subscription lock held, so they may subscribe further.
    ///
    /// # Errors
    /// The first handler error stops dispatch.
    pub fn notify(&self, subject: &dyn Subject, event: &Interface) -> Result<usize, GrokError> {
        let required = [subject.type_ref(), TypeRef::Interface(event.clone())];
        let handlers: Vec<Handler> = self
            .subscriptions
            .read()
            .iter()
            .filter(|s| s.matches(&required))
            .map(|s| s.handler.clone())
            .collect();

        trace!(subject = %required[0], event = %event, handlers = handlers.len(), "Dispatching event");
        let notification = Notification { subject, event };
        for handler in &handlers {
            handler.call(&notification)?;
        }
        Ok(handlers.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Page;

    impl Subject for Page {
        fn type_ref(&self) -> TypeRef {
            TypeRef::class("app.Page")
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_dispatch_matches_subject_and_event() {
        let dispatcher = EventDispatcher::default();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        dispatcher.subscribe(
            Handler::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
            vec![TypeRef::class("app.Page"), Interface::OBJECT_ADDED_EVENT.into()],
        );
        dispatcher.subscribe(
            Handler::new(|_| Err("never called".into())),
            vec![TypeRef::class("app.Folder"), Interface::OBJECT_ADDED_EVENT.into()],
        );
        let counter = Arc::clone(&hits);
        dispatcher.subscribe(
            Handler::new(move |n| {
                assert!(n.subject.as_any().is::<Page>());
                counter.fetch_add(10, Ordering::SeqCst);
                Ok(())
            }),
            vec![Interface::BASE.into(), Interface::OBJECT_ADDED_EVENT.into()],
        );

        let ran = dispatcher.notify(&Page, &Interface::OBJECT_ADDED_EVENT).unwrap();
        assert_eq!(ran, 2);
        assert_eq!(hits.load(Ordering::SeqCst), 11);
        assert_eq!(dispatcher.notify(&Page, &Interface::new("IObjectRemovedEvent")).unwrap(), 0);
    }

    #[test]
    fn test_handler_error_propagates() {
        let dispatcher = EventDispatcher::default();
        dispatcher.subscribe(
            Handler::new(|_| Err("boom".into())),
            vec![TypeRef::class("app.Page"), Interface::OBJECT_ADDED_EVENT.into()],
        );
        let err = dispatcher.notify(&Page, &Interface::OBJECT_ADDED_EVENT).unwrap_err();
        assert_eq!(err.kind(), "Internal");
    }
}
