//! Driver: builds the form, wires it, and plays a sequence of user actions.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::{SlotRules, TODAY};
use crate::error::FormError;
use crate::mediator::{FormComponents, FormState, OrderFormMediator};
use crate::trace::TraceSink;

/// The form as the user sees it: six components plus their coordinator.
pub struct OrderForm {
    components: FormComponents,
    mediator: Rc<OrderFormMediator>,
}

impl OrderForm {
    pub fn new(rules: SlotRules, trace: Rc<dyn TraceSink>) -> Result<Self, FormError> {
        let components = FormComponents::new(&trace);
        let mediator = OrderFormMediator::wire(components.clone(), rules, trace)?;
        Ok(Self {
            components,
            mediator,
        })
    }

    pub fn select_date(&self, date: &str) {
        self.components.date.select_date(date);
    }

    pub fn toggle_other_person(&self, state: bool) {
        self.components.other_person.toggle(state);
    }

    pub fn toggle_pickup(&self, state: bool) {
        self.components.pickup.toggle(state);
    }

    pub fn apply(&self, step: &Step) {
        log::info!("step: {step:?}");
        match step {
            Step::SelectDate { value } => self.select_date(value),
            Step::ToggleOtherPerson { state } => self.toggle_other_person(*state),
            Step::TogglePickup { state } => self.toggle_pickup(*state),
            Step::Notify { sender, event } => {
                self.mediator.notify_named(sender, event);
            }
        }
    }

    pub fn components(&self) -> &FormComponents {
        &self.components
    }

    pub fn mediator(&self) -> &OrderFormMediator {
        &self.mediator
    }

    pub fn state(&self) -> FormState {
        self.mediator.snapshot()
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    SelectDate { value: String },
    ToggleOtherPerson { state: bool },
    TogglePickup { state: bool },
    /// Raw `(sender, event)` pair; unknown pairs are ignored.
    Notify { sender: String, event: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub rules: SlotRules,
    pub steps: Vec<Step>,
}

impl Default for Scenario {
    /// Pick today, send to another person, switch to pickup, then back.
    fn default() -> Self {
        Self {
            rules: SlotRules::default(),
            steps: vec![
                Step::SelectDate {
                    value: TODAY.to_string(),
                },
                Step::ToggleOtherPerson { state: true },
                Step::TogglePickup { state: true },
                Step::TogglePickup { state: false },
            ],
        }
    }
}

impl Scenario {
    pub fn run(&self, trace: Rc<dyn TraceSink>) -> Result<FormState, FormError> {
        let form = OrderForm::new(self.rules.clone(), trace)?;
        for step in &self.steps {
            form.apply(step);
        }
        Ok(form.state())
    }
}
