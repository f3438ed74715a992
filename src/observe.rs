//! Resize observation: an explicit registry of observed elements.
//!
//! Hosts register the elements they lay out (`add_element`) and report their
//! bounds after every layout pass (`report`). Components subscribe to the
//! dimensions they care about (`observe`) and receive [`ResizeDelivery`]s only
//! when that dimension actually changed. The registry is an ordinary value
//! owned by whoever composes the UI tree; there is no process-wide singleton.
//!
//! Elements and observations live in slotmap arenas, so ids stay valid and
//! cheap to copy, and stale ids are detected instead of aliasing new entries.

use slotmap::{new_key_type, SlotMap};

use crate::geometry::Region;

new_key_type! {
    /// Identifier for an observed element (a container or a pane).
    pub struct ElementId;
}

new_key_type! {
    /// Identifier for one observation of one element.
    pub struct ObserverId;
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which part of an element's bounds an observation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservedDimension {
    /// Only width changes.
    Width,
    /// Only height changes.
    Height,
    /// Any change of position or size.
    Bounds,
}

impl ObservedDimension {
    fn changed(self, before: Region, after: Region) -> bool {
        match self {
            ObservedDimension::Width => before.width != after.width,
            ObservedDimension::Height => before.height != after.height,
            ObservedDimension::Bounds => before != after,
        }
    }
}

/// A notification that an observed element changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDelivery {
    pub observer: ObserverId,
    pub element: ElementId,
    pub bounds: Region,
}

/// Errors from registry operations on ids that are no longer valid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ObserveError {
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),
    #[error("unknown observer {0:?}")]
    UnknownObserver(ObserverId),
}

#[derive(Debug)]
struct ElementRecord {
    label: String,
    bounds: Option<Region>,
    observers: Vec<ObserverId>,
}

#[derive(Debug)]
struct Observation {
    element: ElementId,
    dimension: ObservedDimension,
    last_delivered: Option<Region>,
}

// ---------------------------------------------------------------------------
// ObserverRegistry
// ---------------------------------------------------------------------------

/// Maps observed elements to the observations registered on them.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    elements: SlotMap<ElementId, ElementRecord>,
    observers: SlotMap<ObserverId, Observation>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element. The label is only used for logging.
    pub fn add_element(&mut self, label: impl Into<String>) -> ElementId {
        self.elements.insert(ElementRecord {
            label: label.into(),
            bounds: None,
            observers: Vec::new(),
        })
    }

    /// Remove an element and disconnect every observation on it.
    pub fn remove_element(&mut self, element: ElementId) -> Result<(), ObserveError> {
        let record = self
            .elements
            .remove(element)
            .ok_or(ObserveError::UnknownElement(element))?;
        for observer in record.observers {
            self.observers.remove(observer);
        }
        Ok(())
    }

    /// Start observing `dimension` of `element`.
    pub fn observe(
        &mut self,
        element: ElementId,
        dimension: ObservedDimension,
    ) -> Result<ObserverId, ObserveError> {
        if !self.elements.contains_key(element) {
            return Err(ObserveError::UnknownElement(element));
        }
        let id = self.observers.insert(Observation {
            element,
            dimension,
            last_delivered: None,
        });
        if let Some(record) = self.elements.get_mut(element) {
            record.observers.push(id);
            tracing::trace!(element = %record.label, ?dimension, "observe");
        }
        Ok(id)
    }

    /// Stop an observation.
    pub fn unobserve(&mut self, observer: ObserverId) -> Result<(), ObserveError> {
        let observation = self
            .observers
            .remove(observer)
            .ok_or(ObserveError::UnknownObserver(observer))?;
        if let Some(record) = self.elements.get_mut(observation.element) {
            record.observers.retain(|&id| id != observer);
        }
        Ok(())
    }

    /// Whether the observation is still connected.
    pub fn is_observing(&self, observer: ObserverId) -> bool {
        self.observers.contains_key(observer)
    }

    /// Total number of connected observations.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// The first delivery for a fresh observation of an element whose bounds
    /// are already known. Returns `None` once the observation has been
    /// delivered or while the element has never been reported.
    pub fn initial_delivery(&mut self, observer: ObserverId) -> Option<ResizeDelivery> {
        let observation = self.observers.get_mut(observer)?;
        if observation.last_delivered.is_some() {
            return None;
        }
        let bounds = self.elements.get(observation.element)?.bounds?;
        observation.last_delivered = Some(bounds);
        Some(ResizeDelivery {
            observer,
            element: observation.element,
            bounds,
        })
    }

    /// Report new bounds for `element`.
    ///
    /// Returns one delivery per observation whose dimension changed since its
    /// last delivery (every observation's first report is delivered). Order
    /// follows observation registration order.
    pub fn report(
        &mut self,
        element: ElementId,
        bounds: Region,
    ) -> Result<Vec<ResizeDelivery>, ObserveError> {
        let record = self
            .elements
            .get_mut(element)
            .ok_or(ObserveError::UnknownElement(element))?;
        record.bounds = Some(bounds);

        let mut deliveries = Vec::new();
        for &observer in &record.observers {
            let Some(observation) = self.observers.get_mut(observer) else {
                continue;
            };
            let due = match observation.last_delivered {
                None => true,
                Some(previous) => observation.dimension.changed(previous, bounds),
            };
            if due {
                observation.last_delivered = Some(bounds);
                deliveries.push(ResizeDelivery {
                    observer,
                    element,
                    bounds,
                });
            }
        }
        if !deliveries.is_empty() {
            tracing::trace!(
                element = %record.label,
                width = bounds.width,
                height = bounds.height,
                count = deliveries.len(),
                "resize delivered"
            );
        }
        Ok(deliveries)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ObserverRegistry, ElementId) {
        let mut reg = ObserverRegistry::new();
        let el = reg.add_element("container");
        (reg, el)
    }

    #[test]
    fn first_report_is_delivered() {
        let (mut reg, el) = setup();
        let obs = reg.observe(el, ObservedDimension::Width).unwrap();
        let out = reg.report(el, Region::new(0, 0, 100, 10)).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].observer, obs);
        assert_eq!(out[0].bounds.width, 100);
    }

    #[test]
    fn width_observer_ignores_height_changes() {
        let (mut reg, el) = setup();
        reg.observe(el, ObservedDimension::Width).unwrap();
        reg.report(el, Region::new(0, 0, 100, 10)).unwrap();
        assert!(reg.report(el, Region::new(0, 0, 100, 40)).unwrap().is_empty());
        assert_eq!(reg.report(el, Region::new(0, 0, 90, 40)).unwrap().len(), 1);
    }

    #[test]
    fn height_observer_ignores_width_changes() {
        let (mut reg, el) = setup();
        reg.observe(el, ObservedDimension::Height).unwrap();
        reg.report(el, Region::new(0, 0, 100, 10)).unwrap();
        assert!(reg.report(el, Region::new(0, 0, 50, 10)).unwrap().is_empty());
        assert_eq!(reg.report(el, Region::new(0, 0, 50, 12)).unwrap().len(), 1);
    }

    #[test]
    fn bounds_observer_sees_moves() {
        let (mut reg, el) = setup();
        reg.observe(el, ObservedDimension::Bounds).unwrap();
        reg.report(el, Region::new(0, 0, 10, 10)).unwrap();
        assert_eq!(reg.report(el, Region::new(3, 0, 10, 10)).unwrap().len(), 1);
        assert!(reg.report(el, Region::new(3, 0, 10, 10)).unwrap().is_empty());
    }

    #[test]
    fn observations_on_other_elements_are_untouched() {
        let (mut reg, el) = setup();
        let other = reg.add_element("pane");
        reg.observe(other, ObservedDimension::Height).unwrap();
        assert!(reg.report(el, Region::new(0, 0, 5, 5)).unwrap().is_empty());
    }

    #[test]
    fn initial_delivery_uses_known_bounds_once() {
        let (mut reg, el) = setup();
        reg.report(el, Region::new(0, 0, 80, 20)).unwrap();
        let obs = reg.observe(el, ObservedDimension::Width).unwrap();

        let first = reg.initial_delivery(obs).unwrap();
        assert_eq!(first.bounds.width, 80);
        assert!(reg.initial_delivery(obs).is_none());
        // Same width again: nothing new.
        assert!(reg.report(el, Region::new(0, 0, 80, 20)).unwrap().is_empty());
    }

    #[test]
    fn initial_delivery_without_bounds_is_none() {
        let (mut reg, el) = setup();
        let obs = reg.observe(el, ObservedDimension::Width).unwrap();
        assert!(reg.initial_delivery(obs).is_none());
    }

    #[test]
    fn unobserve_disconnects() {
        let (mut reg, el) = setup();
        let obs = reg.observe(el, ObservedDimension::Width).unwrap();
        reg.unobserve(obs).unwrap();
        assert!(!reg.is_observing(obs));
        assert_eq!(reg.observer_count(), 0);
        assert!(reg.report(el, Region::new(0, 0, 1, 1)).unwrap().is_empty());
        assert_eq!(reg.unobserve(obs), Err(ObserveError::UnknownObserver(obs)));
    }

    #[test]
    fn remove_element_drops_its_observers() {
        let (mut reg, el) = setup();
        let a = reg.observe(el, ObservedDimension::Width).unwrap();
        let b = reg.observe(el, ObservedDimension::Height).unwrap();
        reg.remove_element(el).unwrap();
        assert!(!reg.is_observing(a));
        assert!(!reg.is_observing(b));
        assert_eq!(
            reg.report(el, Region::new(0, 0, 1, 1)),
            Err(ObserveError::UnknownElement(el))
        );
    }

    #[test]
    fn observe_unknown_element_fails() {
        let (mut reg, el) = setup();
        reg.remove_element(el).unwrap();
        assert_eq!(
            reg.observe(el, ObservedDimension::Width),
            Err(ObserveError::UnknownElement(el))
        );
    }
}
