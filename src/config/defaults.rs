use crate::toggle::SubmenuPolicy;

pub const DEFAULT_SIDEBAR_WIDTH: u16 = 24;
pub const MIN_SIDEBAR_WIDTH: u16 = 12;
pub const MAX_SIDEBAR_WIDTH: u16 = 60;

pub(super) const WORD_DATA_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];
// Data files larger than this are almost certainly not a vocabulary list.
pub(super) const MAX_WORD_DATA_BYTES: u64 = 16 * 1024 * 1024;

pub const fn default_submenu_policy() -> SubmenuPolicy {
    SubmenuPolicy::Exclusive
}
