//! Main chat loop orchestration.
//!
//! One task owns the controller. It waits on two things at once: the next
//! due playback step from the sequencer, and the next line from readline.
//! Whichever comes first is applied; the prompt is then refreshed from the
//! active input configuration.

use std::io::Write;
use std::path::Path;

use tracing::info;

use banter_core::controller::{ChatController, UserAction};
use banter_core::input::InputController;
use banter_core::transport::TurnTransport;
use banter_infra::http::HttpTransport;
use banter_types::config::WidgetConfig;
use banter_types::input::InputConfig;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent, prompt_for};
use super::surface::TerminalSurface;

/// What a submitted line means in the current input state.
#[derive(Debug, PartialEq)]
pub enum LineIntent {
    /// Nothing typed.
    Empty,
    /// A slash command.
    Command(ChatCommand),
    /// Something for the widget to handle.
    Act(UserAction),
    /// Choices are showing and the line names none of them.
    UnknownChoice,
    /// No input is accepted until the reply has played.
    Busy,
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Exit,
}

/// Decide what a submitted line means.
pub fn interpret(line: &str, input: &InputController) -> LineIntent {
    let line = line.trim();
    if let Some(cmd) = commands::parse(line) {
        return LineIntent::Command(cmd);
    }
    if line.is_empty() {
        return LineIntent::Empty;
    }

    match input.config() {
        InputConfig::Entry { .. } => LineIntent::Act(UserAction::SubmitText(line.to_string())),
        InputConfig::Choices { .. } => match input.find_choice(line) {
            Some(index) => LineIntent::Act(UserAction::Choose(index)),
            None => LineIntent::UnknownChoice,
        },
        InputConfig::Hidden => LineIntent::Busy,
    }
}

/// Run the interactive chat against the backend at `backend_url`.
pub async fn run_chat_loop(
    config: &WidgetConfig,
    backend_url: &str,
    export: Option<&Path>,
) -> anyhow::Result<()> {
    print_welcome_banner(backend_url);

    let (mut chat_input, writer) = ChatInput::new(prompt_for(&InputConfig::Hidden))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let transport = HttpTransport::new(backend_url);
    let mut controller = ChatController::new(transport, TerminalSurface::new(writer), config);

    info!(backend = backend_url, "Chat session starting");
    controller.start().await;
    chat_input.set_prompt(prompt_for(controller.input_config()));

    loop {
        tokio::select! {
            Some(event) = controller.next_event() => controller.apply(event),
            input = chat_input.read_line() => match input {
                InputEvent::Eof => break,
                InputEvent::Interrupted => {
                    controller
                        .surface_mut()
                        .notice("Press Ctrl+D to exit, or keep chatting.");
                }
                InputEvent::Line(line) => {
                    if handle_line(&line, &mut controller, &mut chat_input).await == Flow::Exit {
                        break;
                    }
                }
            },
        }
        chat_input.set_prompt(prompt_for(controller.input_config()));
    }

    controller.surface_mut().notice("Session ended.");
    chat_input.flush();
    info!(entries = controller.transcript().len(), "Chat session ended");

    if let Some(path) = export {
        tokio::fs::write(path, controller.transcript_html()).await?;
        println!(
            "  {} Transcript written to {}",
            console::style("*").cyan().bold(),
            console::style(path.display()).dim()
        );
    }

    Ok(())
}

async fn handle_line<T: TurnTransport, W: Write>(
    line: &str,
    controller: &mut ChatController<T, TerminalSurface<W>>,
    chat_input: &mut ChatInput,
) -> Flow {
    match interpret(line, controller.input()) {
        LineIntent::Empty => {}
        LineIntent::Command(ChatCommand::Help) => {
            controller.surface_mut().write_raw(&commands::help_text());
        }
        LineIntent::Command(ChatCommand::Restart) => {
            controller.handle(UserAction::Restart).await;
        }
        LineIntent::Command(ChatCommand::Clear) => chat_input.clear(),
        LineIntent::Command(ChatCommand::Exit) => return Flow::Exit,
        LineIntent::Command(ChatCommand::Unknown(name)) => {
            controller.surface_mut().notice(&format!(
                "Unknown command: {name}. Type /help for available commands."
            ));
        }
        LineIntent::Act(action) => controller.handle(action).await,
        LineIntent::UnknownChoice => {
            controller
                .surface_mut()
                .notice("Pick one of the choices above by number or label.");
        }
        LineIntent::Busy => {
            controller.surface_mut().notice("One moment...");
        }
    }
    Flow::Continue
}
