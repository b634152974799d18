//! Field components of the order form.
//!
//! A component owns its local state and a non-owning link to the coordinator.
//! Self-reporting components (the date picker and both checkboxes) notify the
//! coordinator after every change; the rest only react to it.
//! Reactive components still get a link so every component is wired the same way.

use std::cell::{Cell, OnceCell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::FormError;
use crate::mediator::{FormEvent, Mediator};
use crate::trace::{TraceLine, TraceSink, TraceSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    DeliveryDate,
    TimeSlots,
    OtherPersonCheckbox,
    NameField,
    PhoneField,
    PickupCheckbox,
}

impl ComponentId {
    pub const ALL: [ComponentId; 6] = [
        ComponentId::DeliveryDate,
        ComponentId::TimeSlots,
        ComponentId::OtherPersonCheckbox,
        ComponentId::NameField,
        ComponentId::PhoneField,
        ComponentId::PickupCheckbox,
    ];

    /// Sender name used on the string boundary.
    pub fn name(&self) -> &'static str {
        match self {
            ComponentId::DeliveryDate => "DeliveryDate",
            ComponentId::TimeSlots => "TimeSlots",
            ComponentId::OtherPersonCheckbox => "OtherPersonCheckbox",
            ComponentId::NameField => "NameField",
            ComponentId::PhoneField => "PhoneField",
            ComponentId::PickupCheckbox => "PickupCheckbox",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentId::DeliveryDate => "Delivery date",
            ComponentId::TimeSlots => "Delivery time",
            ComponentId::OtherPersonCheckbox => "Recipient is another person",
            ComponentId::NameField => "Name field",
            ComponentId::PhoneField => "Phone field",
            ComponentId::PickupCheckbox => "Pickup",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Coordinator link
// =============================================================================

/// Back-reference to the coordinator, set at most once.
#[derive(Default)]
pub struct MediatorLink {
    mediator: OnceCell<Weak<dyn Mediator>>,
}

impl MediatorLink {
    pub fn is_wired(&self) -> bool {
        self.mediator.get().is_some()
    }

    fn set(&self, id: ComponentId, mediator: Weak<dyn Mediator>) -> Result<(), FormError> {
        self.mediator
            .set(mediator)
            .map_err(|_| FormError::AlreadyWired { component: id })
    }

    fn notify(&self, event: FormEvent) {
        match self.mediator.get().and_then(Weak::upgrade) {
            Some(mediator) => mediator.notify(event),
            None => log::warn!("{} has no live coordinator, dropping {:?}", event.sender(), event),
        }
    }
}

pub trait Component {
    fn id(&self) -> ComponentId;

    fn link(&self) -> &MediatorLink;

    fn set_mediator(&self, mediator: Weak<dyn Mediator>) -> Result<(), FormError> {
        self.link().set(self.id(), mediator)
    }

    fn is_wired(&self) -> bool {
        self.link().is_wired()
    }
}

fn emit(trace: &Rc<dyn TraceSink>, id: ComponentId, message: String) {
    trace.emit(TraceLine::new(TraceSource::Component(id), message));
}

fn yes_no(state: bool) -> &'static str {
    if state {
        "yes"
    } else {
        "no"
    }
}

fn shown_hidden(state: bool) -> &'static str {
    if state {
        "shown"
    } else {
        "hidden"
    }
}

// =============================================================================
// Delivery date
// =============================================================================

pub struct DeliveryDatePicker {
    date: RefCell<String>,
    link: MediatorLink,
    trace: Rc<dyn TraceSink>,
}

impl DeliveryDatePicker {
    pub fn new(trace: Rc<dyn TraceSink>) -> Self {
        Self {
            date: RefCell::new(String::new()),
            link: MediatorLink::default(),
            trace,
        }
    }

    pub fn select_date(&self, date: impl Into<String>) {
        let date = date.into();
        emit(&self.trace, self.id(), format!("selected: {date}"));
        *self.date.borrow_mut() = date;
        self.link.notify(FormEvent::DateChanged);
    }

    pub fn date(&self) -> String {
        self.date.borrow().clone()
    }
}

impl Component for DeliveryDatePicker {
    fn id(&self) -> ComponentId {
        ComponentId::DeliveryDate
    }

    fn link(&self) -> &MediatorLink {
        &self.link
    }
}

// =============================================================================
// Time slots
// =============================================================================

pub struct TimeSlotSelector {
    slots: RefCell<Vec<String>>,
    link: MediatorLink,
    trace: Rc<dyn TraceSink>,
}

impl TimeSlotSelector {
    pub fn new(trace: Rc<dyn TraceSink>) -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            link: MediatorLink::default(),
            trace,
        }
    }

    pub fn update_available_slots(&self, slots: Vec<String>) {
        let listed = if slots.is_empty() {
            "none".to_string()
        } else {
            slots.join(" ")
        };
        emit(&self.trace, self.id(), format!("available slots updated: {listed}"));
        *self.slots.borrow_mut() = slots;
    }

    pub fn slots(&self) -> Vec<String> {
        self.slots.borrow().clone()
    }
}

impl Component for TimeSlotSelector {
    fn id(&self) -> ComponentId {
        ComponentId::TimeSlots
    }

    fn link(&self) -> &MediatorLink {
        &self.link
    }
}

// =============================================================================
// Checkboxes
// =============================================================================

pub struct OtherPersonCheckbox {
    checked: Cell<bool>,
    link: MediatorLink,
    trace: Rc<dyn TraceSink>,
}

impl OtherPersonCheckbox {
    pub fn new(trace: Rc<dyn TraceSink>) -> Self {
        Self {
            checked: Cell::new(false),
            link: MediatorLink::default(),
            trace,
        }
    }

    pub fn toggle(&self, state: bool) {
        self.checked.set(state);
        emit(&self.trace, self.id(), format!("state: {}", yes_no(state)));
        self.link.notify(FormEvent::OtherPersonToggled);
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }
}

impl Component for OtherPersonCheckbox {
    fn id(&self) -> ComponentId {
        ComponentId::OtherPersonCheckbox
    }

    fn link(&self) -> &MediatorLink {
        &self.link
    }
}

pub struct PickupCheckbox {
    checked: Cell<bool>,
    link: MediatorLink,
    trace: Rc<dyn TraceSink>,
}

impl PickupCheckbox {
    pub fn new(trace: Rc<dyn TraceSink>) -> Self {
        Self {
            checked: Cell::new(false),
            link: MediatorLink::default(),
            trace,
        }
    }

    pub fn toggle(&self, state: bool) {
        self.checked.set(state);
        emit(&self.trace, self.id(), format!("state: {}", yes_no(state)));
        self.link.notify(FormEvent::PickupToggled);
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }
}

impl Component for PickupCheckbox {
    fn id(&self) -> ComponentId {
        ComponentId::PickupCheckbox
    }

    fn link(&self) -> &MediatorLink {
        &self.link
    }
}

// =============================================================================
// Recipient fields
// =============================================================================

pub struct RecipientNameField {
    visible: Cell<bool>,
    link: MediatorLink,
    trace: Rc<dyn TraceSink>,
}

impl RecipientNameField {
    pub fn new(trace: Rc<dyn TraceSink>) -> Self {
        Self {
            visible: Cell::new(false),
            link: MediatorLink::default(),
            trace,
        }
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
        emit(&self.trace, self.id(), shown_hidden(visible).to_string());
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

impl Component for RecipientNameField {
    fn id(&self) -> ComponentId {
        ComponentId::NameField
    }

    fn link(&self) -> &MediatorLink {
        &self.link
    }
}

pub struct RecipientPhoneField {
    visible: Cell<bool>,
    link: MediatorLink,
    trace: Rc<dyn TraceSink>,
}

impl RecipientPhoneField {
    pub fn new(trace: Rc<dyn TraceSink>) -> Self {
        Self {
            visible: Cell::new(false),
            link: MediatorLink::default(),
            trace,
        }
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
        emit(&self.trace, self.id(), shown_hidden(visible).to_string());
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

impl Component for RecipientPhoneField {
    fn id(&self) -> ComponentId {
        ComponentId::PhoneField
    }

    fn link(&self) -> &MediatorLink {
        &self.link
    }
}
