//! Reaction table: input change → pure handler → output slot.
//!
//! Handlers never see history, only the dataset and the current inputs, so
//! replaying the same inputs always reproduces the same charts.

use crate::chart::{ChartSpec, build_pie_spec, build_scatter_spec};
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::model::Dataset;

/// UI controls whose value changes trigger reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputId {
    SiteDropdown,
    PayloadSlider,
}

/// Display regions that receive chart specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputId {
    SuccessPieChart,
    SuccessPayloadScatterChart,
}

/// Current value of every tracked input.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

/// A single user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    SiteChanged(SiteSelection),
    RangeChanged(PayloadRange),
}

impl InputEvent {
    pub fn input(&self) -> InputId {
        match self {
            InputEvent::SiteChanged(_) => InputId::SiteDropdown,
            InputEvent::RangeChanged(_) => InputId::PayloadSlider,
        }
    }
}

impl Inputs {
    /// Apply an event; returns `false` when the value was already current.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::SiteChanged(site) if site != self.site => self.site = site,
            InputEvent::RangeChanged(range) if range != self.payload => self.payload = range,
            _ => return false,
        }
        true
    }
}

pub type Handler = fn(&Dataset, &Inputs) -> ChartSpec;

pub struct Reaction {
    pub name: &'static str,
    pub triggers: &'static [InputId],
    pub output: OutputId,
    pub handler: Handler,
}

/// One chart produced by a reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub output: OutputId,
    pub spec: ChartSpec,
}

#[derive(Default)]
pub struct Dispatcher {
    reactions: Vec<Reaction>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two dashboard reactions: the pie follows the site dropdown, the
    /// scatter follows both the dropdown and the payload slider.
    pub fn dashboard() -> Self {
        let mut d = Self::new();
        d.register(Reaction {
            name: "site-changed",
            triggers: &[InputId::SiteDropdown],
            output: OutputId::SuccessPieChart,
            handler: |ds, inputs| build_pie_spec(ds.records(), &inputs.site),
        });
        d.register(Reaction {
            name: "site-or-range-changed",
            triggers: &[InputId::SiteDropdown, InputId::PayloadSlider],
            output: OutputId::SuccessPayloadScatterChart,
            handler: |ds, inputs| build_scatter_spec(ds.records(), &inputs.site, inputs.payload),
        });
        d
    }

    pub fn register(&mut self, reaction: Reaction) {
        self.reactions.push(reaction);
    }

    /// Evaluate every reaction triggered by one of `changed`, in
    /// registration order.
    pub fn dispatch(&self, dataset: &Dataset, inputs: &Inputs, changed: &[InputId]) -> Vec<Emission> {
        self.reactions
            .iter()
            .filter(|r| r.triggers.iter().any(|t| changed.contains(t)))
            .map(|r| Self::fire(r, dataset, inputs))
            .collect()
    }

    /// Evaluate every reaction, e.g. for the first frame.
    pub fn fire_all(&self, dataset: &Dataset, inputs: &Inputs) -> Vec<Emission> {
        self.reactions
            .iter()
            .map(|r| Self::fire(r, dataset, inputs))
            .collect()
    }

    fn fire(reaction: &Reaction, dataset: &Dataset, inputs: &Inputs) -> Emission {
        log::debug!("reaction '{}' → {:?}", reaction.name, reaction.output);
        Emission {
            output: reaction.output,
            spec: (reaction.handler)(dataset, inputs),
        }
    }
}
