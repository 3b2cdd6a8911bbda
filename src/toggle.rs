//! Two-state toggles: the navigation sidebar, submenu panels, and collapsible forms.

use crate::view::{
    hidden_offset, DeckFormElement, Display, SidebarElement, SubmenuElement, Trigger,
};
use clap::ValueEnum;

/// How submenu triggers interact. One policy is picked per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SubmenuPolicy {
    /// At most one submenu open; activating a different trigger switches to it.
    #[default]
    Exclusive,
    /// Each trigger toggles only its own submenu.
    Independent,
}

impl SubmenuPolicy {
    pub fn label(self) -> &'static str {
        match self {
            SubmenuPolicy::Exclusive => "exclusive",
            SubmenuPolicy::Independent => "independent",
        }
    }
}

impl std::fmt::Display for SubmenuPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Menu control flipping the sidebar in and out of view.
pub struct SidebarToggle {
    toggle: Trigger,
    sidebar: SidebarElement,
    width: u16,
}

impl SidebarToggle {
    pub fn new(toggle: Trigger, sidebar: SidebarElement, width: u16) -> Self {
        Self {
            toggle,
            sidebar,
            width,
        }
    }

    pub fn toggle(&mut self) {
        self.sidebar.active = !self.sidebar.active;
        self.sidebar.left = if self.sidebar.active {
            0
        } else {
            hidden_offset(self.width)
        };
        self.toggle.active = self.sidebar.active;
        tracing::debug!(target: "wordpanel::toggle", shown = self.sidebar.active, "sidebar toggled");
    }

    pub fn is_shown(&self) -> bool {
        self.sidebar.active
    }

    pub fn sidebar(&self) -> &SidebarElement {
        &self.sidebar
    }

    pub fn trigger(&self) -> &Trigger {
        &self.toggle
    }

    pub fn width(&self) -> u16 {
        self.width
    }
}

/// Submenu triggers with their panels, governed by one policy.
pub struct SubmenuGroup {
    policy: SubmenuPolicy,
    submenus: Vec<SubmenuElement>,
}

impl SubmenuGroup {
    pub fn new(policy: SubmenuPolicy, submenus: Vec<SubmenuElement>) -> Self {
        Self { policy, submenus }
    }

    pub fn policy(&self) -> SubmenuPolicy {
        self.policy
    }

    pub fn submenus(&self) -> &[SubmenuElement] {
        &self.submenus
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.submenus.get(index).is_some_and(SubmenuElement::is_open)
    }

    /// Handle activation of the trigger at `index`. Unknown indices are ignored.
    pub fn activate(&mut self, index: usize) {
        let Some(was_open) = self.submenus.get(index).map(SubmenuElement::is_open) else {
            tracing::debug!(target: "wordpanel::toggle", index, "no submenu bound at index");
            return;
        };
        match self.policy {
            SubmenuPolicy::Exclusive => {
                for submenu in &mut self.submenus {
                    set_open(submenu, false);
                }
                set_open(&mut self.submenus[index], !was_open);
            }
            SubmenuPolicy::Independent => {
                set_open(&mut self.submenus[index], !was_open);
            }
        }
        tracing::debug!(
            target: "wordpanel::toggle",
            index,
            open = !was_open,
            policy = self.policy.label(),
            "submenu toggled"
        );
    }
}

fn set_open(submenu: &mut SubmenuElement, open: bool) {
    submenu.panel = if open { Display::Block } else { Display::None };
    submenu.trigger.active = open;
}

/// Element whose visibility a `PanelToggle` flips.
pub trait Panel {
    fn display(&self) -> Display;
    fn set_display(&mut self, display: Display);
}

impl Panel for DeckFormElement {
    fn display(&self) -> Display {
        self.display
    }

    fn set_display(&mut self, display: Display) {
        self.display = display;
    }
}

/// A trigger that reveals a panel and hides itself; activating again collapses it.
pub struct PanelToggle<P> {
    trigger: Trigger,
    panel: P,
}

impl<P: Panel> PanelToggle<P> {
    pub fn new(trigger: Trigger, panel: P) -> Self {
        Self { trigger, panel }
    }

    pub fn toggle(&mut self) {
        if self.panel.display().is_visible() {
            self.panel.set_display(Display::None);
            self.trigger.display = Display::InlineBlock;
        } else {
            self.panel.set_display(Display::Block);
            self.trigger.display = Display::None;
        }
        tracing::debug!(target: "wordpanel::toggle", shown = self.is_open(), "panel toggled");
    }

    pub fn is_open(&self) -> bool {
        self.panel.display().is_visible()
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}
