use crate::{
    input::events::{EventHandled, InputEvent},
    Result,
};

/// An interactive collaborator driven by the host's event loop
pub trait PluginTrait {
    fn name(&self) -> &str;

    fn handle_input(&mut self, _input: &InputEvent) -> Result<EventHandled> {
        Ok(EventHandled::NotHandled)
    }
}
