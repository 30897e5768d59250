use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::prelude::*;

use ds_base::constants::{EVENT_POLL_MS, IDLE_POLL_MS, RENDER_THROTTLE_MS, SPINNER_FRAME_MS};

use crate::app::App;
use crate::app::events::handle_event;
use crate::ui;

impl App {
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        tracing::info!(mode = ?self.state.mode, "event loop started");

        loop {
            // === INPUT FIRST: Process user input with minimal latency ===
            if event::poll(Duration::ZERO)? {
                let evt = event::read()?;
                let Some(action) = handle_event(&evt, &self.state) else {
                    tracing::info!("quit requested");
                    break;
                };
                self.handle_action(action);

                // Render immediately after input for instant feedback
                if self.state.dirty {
                    self.render(terminal, Instant::now())?;
                }
            }

            // === BACKGROUND PROCESSING ===
            self.process_gateway_events();
            let now = Instant::now();
            self.process_reveal(now);
            self.update_spinner_animation(now);

            // Render if dirty and enough time has passed
            let throttled = self
                .last_render
                .is_some_and(|last| now.duration_since(last) < Duration::from_millis(RENDER_THROTTLE_MS));
            if self.state.dirty && !throttled {
                self.render(terminal, now)?;
            }

            // Adaptive poll: sleep longer when idle, shorter while a reply is on its way
            let poll_ms = if self.is_active() || self.state.dirty { EVENT_POLL_MS } else { IDLE_POLL_MS };
            let _ = event::poll(Duration::from_millis(poll_ms))?;
        }

        Ok(())
    }

    fn render(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, now: Instant) -> io::Result<()> {
        terminal.draw(|frame| ui::render(frame, &mut self.state))?;
        self.state.dirty = false;
        self.last_render = Some(now);
        Ok(())
    }

    /// Advance the spinner while waiting for the gateway.
    fn update_spinner_animation(&mut self, now: Instant) {
        if !self.state.conversation.loading {
            return;
        }
        if now.duration_since(self.last_spinner) < Duration::from_millis(SPINNER_FRAME_MS) {
            return;
        }
        self.last_spinner = now;
        self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
        self.state.dirty = true;
    }
}
