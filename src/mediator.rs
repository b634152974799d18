//! The coordinator. Holds one handle to every field component and applies the
//! cross-field rules whenever a component reports a change.

use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::components::{
    Component, ComponentId, DeliveryDatePicker, OtherPersonCheckbox, PickupCheckbox,
    RecipientNameField, RecipientPhoneField, TimeSlotSelector,
};
use crate::config::SlotRules;
use crate::error::FormError;
use crate::trace::{TraceLine, TraceSink, TraceSource};

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    DateChanged,
    Toggled,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::DateChanged => "DateChanged",
            EventKind::Toggled => "Toggled",
        }
    }
}

/// Everything a component can report. Each variant fixes both the sender and
/// the kind of change, so dispatch is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    DateChanged,
    OtherPersonToggled,
    PickupToggled,
}

impl FormEvent {
    pub const ALL: [FormEvent; 3] = [
        FormEvent::DateChanged,
        FormEvent::OtherPersonToggled,
        FormEvent::PickupToggled,
    ];

    pub fn sender(&self) -> ComponentId {
        match self {
            FormEvent::DateChanged => ComponentId::DeliveryDate,
            FormEvent::OtherPersonToggled => ComponentId::OtherPersonCheckbox,
            FormEvent::PickupToggled => ComponentId::PickupCheckbox,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            FormEvent::DateChanged => EventKind::DateChanged,
            FormEvent::OtherPersonToggled | FormEvent::PickupToggled => EventKind::Toggled,
        }
    }

    /// Parses a `(sender, event)` name pair. Matching is exact and
    /// case-sensitive; any other pair is not an event.
    pub fn from_names(sender: &str, event: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.sender().name() == sender && candidate.kind().name() == event)
    }
}

pub trait Mediator {
    fn notify(&self, event: FormEvent);
}

// =============================================================================
// Aggregate state
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub date: String,
    pub slots: Vec<String>,
    pub other_person: bool,
    pub pickup: bool,
    pub name_visible: bool,
    pub phone_visible: bool,
}

// =============================================================================
// Coordinator
// =============================================================================

#[derive(Clone)]
pub struct FormComponents {
    pub date: Rc<DeliveryDatePicker>,
    pub slots: Rc<TimeSlotSelector>,
    pub other_person: Rc<OtherPersonCheckbox>,
    pub name: Rc<RecipientNameField>,
    pub phone: Rc<RecipientPhoneField>,
    pub pickup: Rc<PickupCheckbox>,
}

impl FormComponents {
    pub fn new(trace: &Rc<dyn TraceSink>) -> Self {
        Self {
            date: Rc::new(DeliveryDatePicker::new(Rc::clone(trace))),
            slots: Rc::new(TimeSlotSelector::new(Rc::clone(trace))),
            other_person: Rc::new(OtherPersonCheckbox::new(Rc::clone(trace))),
            name: Rc::new(RecipientNameField::new(Rc::clone(trace))),
            phone: Rc::new(RecipientPhoneField::new(Rc::clone(trace))),
            pickup: Rc::new(PickupCheckbox::new(Rc::clone(trace))),
        }
    }

    fn all(&self) -> [&dyn Component; 6] {
        [
            self.date.as_ref(),
            self.slots.as_ref(),
            self.other_person.as_ref(),
            self.name.as_ref(),
            self.phone.as_ref(),
            self.pickup.as_ref(),
        ]
    }
}

pub struct OrderFormMediator {
    components: FormComponents,
    rules: SlotRules,
    trace: Rc<dyn TraceSink>,
}

impl OrderFormMediator {
    /// Builds the coordinator and points every component back at it.
    ///
    /// Fails without touching any component if one of them already reports
    /// to another coordinator.
    pub fn wire(
        components: FormComponents,
        rules: SlotRules,
        trace: Rc<dyn TraceSink>,
    ) -> Result<Rc<Self>, FormError> {
        if let Some(wired) = components.all().into_iter().find(|c| c.is_wired()) {
            return Err(FormError::AlreadyWired {
                component: wired.id(),
            });
        }

        let mediator = Rc::new_cyclic(|this: &Weak<Self>| {
            let link: Weak<dyn Mediator> = this.clone();
            for component in components.all() {
                let wired = component.set_mediator(link.clone());
                debug_assert!(wired.is_ok(), "{} wired twice", component.id());
            }
            Self {
                components,
                rules,
                trace,
            }
        });

        Ok(mediator)
    }

    pub fn rules(&self) -> &SlotRules {
        &self.rules
    }

    /// String boundary for events coming from outside the process. Returns
    /// whether the pair named a known event.
    pub fn notify_named(&self, sender: &str, event: &str) -> bool {
        match FormEvent::from_names(sender, event) {
            Some(event) => {
                self.notify(event);
                true
            }
            None => {
                log::debug!("ignoring unknown event ({sender}, {event})");
                false
            }
        }
    }

    pub fn snapshot(&self) -> FormState {
        FormState {
            date: self.components.date.date(),
            slots: self.components.slots.slots(),
            other_person: self.components.other_person.is_checked(),
            pickup: self.components.pickup.is_checked(),
            name_visible: self.components.name.is_visible(),
            phone_visible: self.components.phone.is_visible(),
        }
    }

    fn say(&self, message: impl Into<String>) {
        self.trace.emit(TraceLine::new(TraceSource::Coordinator, message));
    }

    fn refresh_slots(&self) {
        self.say("refreshing time slots for the selected date");
        let date = self.components.date.date();
        let slots = self.rules.slots_for(&date).to_vec();
        self.components.slots.update_available_slots(slots);
    }

    fn sync_recipient_fields(&self) {
        let state = self.components.other_person.is_checked();
        self.say(if state {
            "recipient is another person: showing recipient fields"
        } else {
            "recipient is the customer: hiding recipient fields"
        });
        self.components.name.set_visible(state);
        self.components.phone.set_visible(state);
    }

    // Unchecking pickup restores neither the slots nor the recipient fields.
    fn apply_pickup(&self) {
        let state = self.components.pickup.is_checked();
        if !state {
            self.say("pickup off: delivery enabled");
            return;
        }
        self.say("pickup on: delivery disabled");
        self.components.slots.update_available_slots(Vec::new());
        self.components.name.set_visible(false);
        self.components.phone.set_visible(false);
    }
}

impl Mediator for OrderFormMediator {
    fn notify(&self, event: FormEvent) {
        log::debug!("{} -> {}", event.sender(), event.kind().name());
        match event {
            FormEvent::DateChanged => self.refresh_slots(),
            FormEvent::OtherPersonToggled => self.sync_recipient_fields(),
            FormEvent::PickupToggled => self.apply_pickup(),
        }
    }
}
