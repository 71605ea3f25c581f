//! Rendering port for the chat widget.
//!
//! A `ChatSurface` is whatever actually displays the conversation: the
//! terminal front end in banter-api, a recording double in tests. The
//! controller is the only caller and calls it from a single task, so the
//! methods take `&mut self` and need no synchronization.

use banter_types::input::InputConfig;
use banter_types::transcript::ChatLogEntry;

pub trait ChatSurface {
    /// Show the bot typing indicator.
    fn show_typing(&mut self);

    /// Remove the typing indicator if it is visible.
    fn hide_typing(&mut self);

    /// Append an entry to the visible conversation.
    fn append(&mut self, entry: &ChatLogEntry);

    /// Remove every visible entry.
    fn clear(&mut self);

    /// Switch the interactive control area to `config`.
    ///
    /// Entry configurations start empty and take focus.
    fn configure_input(&mut self, config: &InputConfig);
}
