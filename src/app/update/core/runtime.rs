use super::super::super::messages::Message;
use super::super::super::state::{App, DRAFT_INPUT_ID, LIST_SCROLL_ID};
use super::super::Effect;
use crate::audio::probe_source;
use iced::event::{self, Event};
use iced::keyboard;
use iced::mouse;
use iced::widget::{scrollable, text_input};
use iced::window;
use iced::Task;

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::PreparePlayback {
                card,
                source,
                request_id,
            } => Task::perform(
                async move {
                    match probe_source(&source) {
                        Ok(duration) => Message::PlaybackReady {
                            card,
                            request_id,
                            duration,
                        },
                        Err(err) => Message::PlaybackFailed {
                            card,
                            request_id,
                            error: format!("{err:#}"),
                        },
                    }
                },
                |message| message,
            ),
            Effect::SnapScroll(offset) => scrollable::snap_to(LIST_SCROLL_ID.clone(), offset),
            Effect::FocusDraft => text_input::focus(DRAFT_INPUT_ID.clone()),
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    // A left-button release must finalize an open drag even when some widget
    // captured the event.
    if let Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) = event {
        return Some(Message::PointerReleased);
    }
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
