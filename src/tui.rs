//! Terminal front end for a running simulation.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sysinfo::{System, SystemExt};

use crate::{grid::Grid, life::Life};

/// State shown by the terminal interface.
#[derive(Debug)]
pub struct App {
    /// The simulation being displayed
    pub life: Life,
    /// Seed to return to on reset
    seed: Grid,
    /// Label shown in the grid pane title
    label: String,
    /// Whether generations advance on every tick
    pub running: bool,
    /// System information for resource monitoring
    sys: System,
}

impl App {
    pub fn new(seed: Grid, label: impl Into<String>) -> App {
        App {
            life: Life::new(seed.clone()),
            seed,
            label: label.into(),
            running: false,
            sys: System::new_all(),
        }
    }

    /// Advances one generation.
    pub fn step(&mut self) {
        self.life.transition();
        self.sys.refresh_memory();
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    /// Goes back to the seed and pauses.
    pub fn reset(&mut self) {
        self.life = Life::new(self.seed.clone());
        self.running = false;
    }

    /// Lays out the grid and statistics panes.
    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
            .split(f.size());

        self.draw_grid(f, chunks[0]);
        self.draw_stats(f, chunks[1]);
    }

    fn draw_grid(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            "{} [Space: Play/Pause | Enter: Step | r: Reset | q: Quit]",
            self.label
        ));

        let paragraph = Paragraph::new(self.life.render())
            .style(Style::default().fg(Color::White))
            .block(block);

        f.render_widget(paragraph, area);
    }

    fn draw_stats(&self, f: &mut Frame, area: Rect) {
        let stats = self.life.stats();
        let memory_used = self.sys.used_memory() / 1024;
        let memory_total = self.sys.total_memory() / 1024;

        let stats_text = format!(
            "Grid: {}x{}\n\
            Generation: {}\n\
            Population: {}\n\
            Births: {}\n\
            Deaths: {}\n\
            Birth Rate: {:.2}/gen\n\
            Death Rate: {:.2}/gen\n\
            Memory Usage: {}KB/{:.2}MB\n\
            Status: {}\n",
            self.life.rows(),
            self.life.cols(),
            stats.generation,
            stats.population,
            stats.births,
            stats.deaths,
            stats.birth_rate(),
            stats.death_rate(),
            memory_used,
            memory_total as f64 / 1024.0,
            if self.running { "Running" } else { "Paused" }
        );

        let stats_widget = Paragraph::new(stats_text)
            .block(Block::default().borders(Borders::ALL).title("Statistics"))
            .wrap(Wrap { trim: true });

        f.render_widget(stats_widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::Pattern;

    #[test]
    fn reset_returns_to_seed() {
        let mut app = App::new(Pattern::Blinker.seed(), "blinker");
        app.toggle_running();
        app.step();
        assert_ne!(app.life.grid(), &Pattern::Blinker.seed());
        app.reset();
        assert!(!app.running);
        assert_eq!(app.life.grid(), &Pattern::Blinker.seed());
        assert_eq!(app.life.stats().generation, 0);
    }
}
