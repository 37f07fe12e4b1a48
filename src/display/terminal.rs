// src/display/terminal.rs
//! Terminal-based interactive map display

use crate::backend::client::HexFetcher;
use crate::cache::{CacheStore, HexLookup, Origin};
use crate::error::{Result, HexError};
use crate::grid::layout_fit;
use crate::viewer::MapViewer;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::Duration;

const PANEL_WIDTH: u16 = 34;

pub struct TerminalDisplay {
    show_coords: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self { show_coords: false }
    }

    /// Run the interactive map until the user quits
    pub async fn run<S: CacheStore, F: HexFetcher>(
        &mut self,
        viewer: &mut MapViewer<S, F>,
    ) -> Result<()> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode().map_err(HexError::Io)?;
        crossterm::execute!(stdout, EnterAlternateScreen, Hide).map_err(HexError::Io)?;

        // Resolve the preselected origin hex before the first frame.
        let startup = viewer.select_current().await;

        let result = match startup {
            Ok(()) => self.event_loop(&mut stdout, viewer).await,
            Err(e) => Err(e),
        };

        crossterm::execute!(stdout, Show, LeaveAlternateScreen).map_err(HexError::Io)?;
        terminal::disable_raw_mode().map_err(HexError::Io)?;
        result
    }

    async fn event_loop<S: CacheStore, F: HexFetcher>(
        &mut self,
        stdout: &mut impl Write,
        viewer: &mut MapViewer<S, F>,
    ) -> Result<()> {
        loop {
            self.render(stdout, viewer)?;

            if !event::poll(Duration::from_millis(200)).map_err(HexError::Io)? {
                continue;
            }
            match event::read().map_err(HexError::Io)? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Left => {
                        viewer.move_selection(-1, 0);
                    }
                    KeyCode::Right => {
                        viewer.move_selection(1, 0);
                    }
                    KeyCode::Up => {
                        viewer.move_selection(0, -1);
                    }
                    KeyCode::Down => {
                        viewer.move_selection(0, 1);
                    }
                    KeyCode::Char('l') => {
                        self.show_coords = !self.show_coords;
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        viewer.select_current().await?;
                    }
                    _ => {}
                },
                // Resize is picked up on the next frame via terminal::size.
                _ => {}
            }
        }
        Ok(())
    }

    /// Render one frame: map area, info panel, footer
    fn render<S: CacheStore, F: HexFetcher>(
        &self,
        stdout: &mut impl Write,
        viewer: &MapViewer<S, F>,
    ) -> Result<()> {
        let (cols, rows) = terminal::size().map_err(HexError::Io)?;
        queue!(stdout, Clear(ClearType::All)).map_err(HexError::Io)?;

        let map_w = cols.saturating_sub(PANEL_WIDTH + 1).max(20);
        let map_h = rows.saturating_sub(2).max(10);

        self.render_map(stdout, viewer, map_w, map_h)?;
        self.render_info_panel(stdout, viewer, cols.saturating_sub(PANEL_WIDTH), map_h)?;
        self.render_footer(stdout, viewer, rows.saturating_sub(1))?;

        stdout.flush().map_err(HexError::Io)?;
        Ok(())
    }

    fn render_map<S: CacheStore, F: HexFetcher>(
        &self,
        stdout: &mut impl Write,
        viewer: &MapViewer<S, F>,
        map_w: u16,
        map_h: u16,
    ) -> Result<()> {
        // Character cells are roughly twice as tall as wide, so fit into a
        // doubled-height viewport and halve y when plotting.
        let fit = layout_fit(
            viewer.cells(),
            map_w as f64,
            map_h as f64 * 2.0,
            viewer.hex_size() * 1.2,
        );

        for cell in viewer.cells() {
            let p = fit.apply(cell.center);
            let label = if self.show_coords {
                format!("{},{}", cell.coord.q, cell.coord.r)
            } else {
                cell.id.clone()
            };

            let col = (p.x - label.len() as f64 / 2.0).round() as i64;
            let row = (p.y / 2.0).round() as i64;
            if col < 0 || row < 0 || row >= map_h as i64 || col + label.len() as i64 > map_w as i64
            {
                continue;
            }

            let selected = cell.id == viewer.selected_id();
            if selected {
                queue!(
                    stdout,
                    MoveTo(col as u16, row as u16),
                    SetBackgroundColor(Color::White),
                    SetForegroundColor(Color::Black),
                    Print(&label),
                    ResetColor
                )
                .map_err(HexError::Io)?;
            } else {
                queue!(
                    stdout,
                    MoveTo(col as u16, row as u16),
                    SetForegroundColor(biome_color(viewer.biome_of(&cell.id))),
                    Print(&label),
                    ResetColor
                )
                .map_err(HexError::Io)?;
            }
        }
        Ok(())
    }

    fn render_info_panel<S: CacheStore, F: HexFetcher>(
        &self,
        stdout: &mut impl Write,
        viewer: &MapViewer<S, F>,
        x: u16,
        height: u16,
    ) -> Result<()> {
        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("Campaign: {}", viewer.campaign()));
        lines.push("-".repeat(PANEL_WIDTH as usize - 2));

        match viewer.last_lookup() {
            Some(lookup) => {
                lines.extend(info_lines(lookup));
            }
            None => lines.push("No hex selected".to_string()),
        }

        for (i, line) in lines.iter().enumerate() {
            if i as u16 >= height {
                break;
            }
            let mut text = line.clone();
            text.truncate(PANEL_WIDTH as usize - 1);
            queue!(stdout, MoveTo(x, i as u16), Print(text)).map_err(HexError::Io)?;
        }
        Ok(())
    }

    fn render_footer<S: CacheStore, F: HexFetcher>(
        &self,
        stdout: &mut impl Write,
        viewer: &MapViewer<S, F>,
        row: u16,
    ) -> Result<()> {
        let help = format!(
            "arrows select | Enter load | l labels | q quit | {} cached",
            viewer.cached_count()
        );
        queue!(
            stdout,
            MoveTo(0, row),
            SetForegroundColor(Color::DarkGrey),
            Print(help),
            ResetColor
        )
        .map_err(HexError::Io)?;
        Ok(())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

/// Info panel rows for a resolved hex
fn info_lines(lookup: &HexLookup) -> Vec<String> {
    let data = &lookup.data;
    let mut lines = Vec::new();

    lines.push(format!("Hex:        {}", data.id));
    match &data.biome {
        Some(biome) => {
            lines.push(format!("Biome:      {}", biome.name));
            lines.push(format!("Altitude:   {:.2}", biome.altitude));
            lines.push(format!("Temp:       {:.2}", biome.temperature));
            lines.push(format!("Humidity:   {:.2}", biome.humidity));
        }
        None => lines.push("Biome:      unknown".to_string()),
    }

    let features = if data.features.is_empty() {
        "-".to_string()
    } else {
        data.features
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    lines.push(format!("Features:   {}", features));

    let encounter = data
        .encounter
        .as_ref()
        .map(|e| e.name.as_str())
        .unwrap_or("-");
    lines.push(format!("Encounter:  {}", encounter));
    lines.push(format!(
        "Discovered: {}",
        if data.discovered { "yes" } else { "no" }
    ));
    if let Some(created) = &data.created_at {
        lines.push(format!("Created:    {}", created.format("%Y-%m-%d %H:%M")));
    }

    lines.push(String::new());
    match &lookup.origin {
        Origin::Fallback { error } => {
            lines.push(format!("Source:     {}", lookup.origin.label()));
            lines.push(format!("Error:      {}", error));
        }
        origin => lines.push(format!("Source:     {}", origin.label())),
    }
    lines
}

/// Stable color per biome name; unloaded hexes stay dim
fn biome_color(biome: &str) -> Color {
    const PALETTE: [Color; 8] = [
        Color::Green,
        Color::DarkGreen,
        Color::Yellow,
        Color::DarkYellow,
        Color::Cyan,
        Color::Blue,
        Color::Magenta,
        Color::Red,
    ];

    match biome {
        "unloaded" => Color::DarkGrey,
        "demo" => Color::Grey,
        name => {
            let hash: usize = name.bytes().map(usize::from).sum();
            PALETTE[hash % PALETTE.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::data::HexData;

    #[test]
    fn test_biome_color_is_stable_and_distinguishes_unloaded() {
        assert_eq!(biome_color("unloaded"), Color::DarkGrey);
        assert_eq!(biome_color("forest"), biome_color("forest"));
    }

    #[test]
    fn test_info_lines_carry_provenance() {
        let lookup = HexLookup {
            data: HexData::placeholder("B2"),
            origin: Origin::Fallback {
                error: "HTTP 500".to_string(),
            },
        };
        let lines = info_lines(&lookup);
        assert!(lines.iter().any(|l| l.contains("demo data")));
        assert!(lines.iter().any(|l| l.contains("HTTP 500")));
    }

    #[test]
    fn test_info_lines_for_live_payload() {
        let data: HexData = serde_json::from_value(serde_json::json!({
            "id": "G7",
            "biome": {"name": "forest", "altitude": 0.4, "temperature": 0.6, "humidity": 0.7},
            "features": [{"name": "ruins"}],
            "encounter": {"name": "wolves"},
            "discovered": true,
        }))
        .unwrap();
        let lines = info_lines(&HexLookup {
            data,
            origin: Origin::Live,
        });
        assert!(lines.iter().any(|l| l.contains("forest")));
        assert!(lines.iter().any(|l| l.contains("ruins")));
        assert!(lines.iter().any(|l| l.ends_with("live")));
        assert!(!lines.iter().any(|l| l.contains("Error:")));
    }
}
