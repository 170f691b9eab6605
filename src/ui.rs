use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, Focus, NoticeKind, Phase, Screen, View};
use crate::command::COMMANDS;
use crate::preview;

// Indigo Night color palette
const BG_DARK: Color = Color::Rgb(9, 9, 11);             // #09090B - Deep background
const BG_PANEL: Color = Color::Rgb(20, 19, 25);          // #141319 - Panel background
const BG_PANEL_ALT: Color = Color::Rgb(23, 23, 28);      // #17171C - Tab strip

// Indigo accents
const INDIGO: Color = Color::Rgb(99, 102, 241);          // #6366F1 - Primary accent
const INDIGO_DEEP: Color = Color::Rgb(30, 26, 120);      // #1E1A78 - Gradient anchor
const VIOLET: Color = Color::Rgb(167, 139, 250);         // #A78BFA - Secondary accent

// Signal colors
const GREEN: Color = Color::Rgb(74, 222, 128);           // Success notices
const RED: Color = Color::Rgb(248, 113, 113);            // Error notices
const AMBER: Color = Color::Rgb(251, 191, 36);           // Info notices

// Text colors
const TEXT_PRIMARY: Color = Color::Rgb(244, 244, 245);   // Near white
const TEXT_SECONDARY: Color = Color::Rgb(161, 161, 170); // Light gray
const TEXT_MUTED: Color = Color::Rgb(113, 113, 122);     // Medium gray

// Border colors
const BORDER_DIM: Color = Color::Rgb(51, 51, 51);        // #333 - Resting border
const BORDER_ACCENT: Color = Color::Rgb(85, 85, 85);     // #555 - Hover border

// Code view
const CODE_FG: Color = Color::Rgb(212, 212, 212);

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, app: &App) {
    // Fill entire background
    let bg = Block::default().style(Style::default().bg(BG_DARK));
    frame.render_widget(bg, frame.area());

    match app.screen {
        Screen::Splash => draw_splash(frame, app),
        Screen::Workbench => draw_workbench(frame, app),
    }

    if app.help_visible {
        let area = frame.area();
        draw_help_overlay(frame, area);
    }
}

fn spinner(app: &App) -> &'static str {
    SPINNER_FRAMES[(app.animation_frame / 6) % SPINNER_FRAMES.len()]
}

fn border_for(focused: bool) -> Color {
    if focused {
        INDIGO
    } else {
        BORDER_DIM
    }
}

// ── Splash ───────────────────────────────────────────────────────

fn draw_splash(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(8),  // Logo
            Constraint::Length(3),  // Tagline
            Constraint::Length(3),  // Hint
            Constraint::Min(0),
        ])
        .split(area);

    draw_logo(frame, v_chunks[1], app.animation_frame);

    // Tagline with typing animation
    let tagline = "Describe a component. Get the code. Preview it live.";
    let visible_chars = ((app.animation_frame as f64 / 120.0 * tagline.len() as f64) as usize)
        .min(tagline.len());
    let typed = if app.animation_frame < 120 {
        format!("{}|", &tagline[..visible_chars])
    } else {
        tagline.to_string()
    };
    let tagline_widget = Paragraph::new(typed)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_SECONDARY));
    frame.render_widget(tagline_widget, v_chunks[2]);

    // Press any key hint with indigo glow
    let glow = (app.animation_frame as f64 / 45.0).sin().abs() * 0.5 + 0.5;
    let r = (30.0 + (99.0 - 30.0) * glow) as u8;
    let g = (26.0 + (102.0 - 26.0) * glow) as u8;
    let b = (120.0 + (241.0 - 120.0) * glow) as u8;
    let hint = Paragraph::new("[ Press any key to start ]")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Rgb(r, g, b)));
    frame.render_widget(hint, v_chunks[3]);

    let version_area = Rect {
        x: area.x,
        y: area.height.saturating_sub(2),
        width: area.width,
        height: 1,
    };
    let version = Paragraph::new(concat!("v", env!("CARGO_PKG_VERSION")))
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_MUTED));
    frame.render_widget(version, version_area);
}

fn draw_logo(frame: &mut Frame, area: Rect, anim_frame: usize) {
    let logo_lines = [
        "██╗   ██╗██╗ ██████╗ ███████╗███╗   ██╗",
        "██║   ██║██║██╔════╝ ██╔════╝████╗  ██║",
        "██║   ██║██║██║  ███╗█████╗  ██╔██╗ ██║",
        "██║   ██║██║██║   ██║██╔══╝  ██║╚██╗██║",
        "╚██████╔╝██║╚██████╔╝███████╗██║ ╚████║",
        " ╚═════╝ ╚═╝ ╚═════╝ ╚══════╝╚═╝  ╚═══╝",
        "",
        "      [ AI Component Generator ]",
    ];

    let mut lines: Vec<Line> = Vec::new();
    for (idx, text) in logo_lines.iter().enumerate() {
        // Vertical indigo-to-violet sweep with a slow shimmer
        let t = idx as f64 / logo_lines.len() as f64;
        let shimmer = ((anim_frame as f64 / 60.0 + t * 3.0).sin() * 0.15 + 0.85).clamp(0.0, 1.0);
        let r = ((99.0 + (167.0 - 99.0) * t) * shimmer) as u8;
        let g = ((102.0 + (139.0 - 102.0) * t) * shimmer) as u8;
        let b = ((241.0 + (250.0 - 241.0) * t) * shimmer) as u8;
        lines.push(Line::from(Span::styled(
            *text,
            Style::default().fg(Color::Rgb(r, g, b)),
        )));
    }

    let logo = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(logo, area);
}

// ── Workbench ────────────────────────────────────────────────────

fn draw_workbench(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let padded = Rect {
        x: area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: area.height,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(10),   // Panels
            Constraint::Length(1), // Footer
        ])
        .split(padded);

    draw_header(frame, app, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(42), // Composer
            Constraint::Length(1),      // Gap
            Constraint::Min(40),        // Output
        ])
        .split(chunks[1]);

    draw_composer(frame, app, columns[0]);
    draw_output(frame, app, columns[2]);
    draw_footer(frame, app, chunks[2]);

    if app.showing_command_popup() {
        draw_command_popup(frame, app, columns[0]);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled("uigen", Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)),
        Span::styled(" · AI component generator", Style::default().fg(TEXT_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(title), area);

    let mode = if app.config.strip_fences { "fenced" } else { "raw" };
    let status = Line::from(vec![
        Span::styled(app.endpoint().to_string(), Style::default().fg(TEXT_MUTED)),
        Span::styled(" · ", Style::default().fg(BORDER_DIM)),
        Span::styled(mode, Style::default().fg(VIOLET)),
    ]);
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Right), area);
}

fn draw_composer(frame: &mut Frame, app: &App, area: Rect) {
    let framework_rows = crate::backend::Framework::ALL.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                   // Intro
            Constraint::Length(framework_rows + 2),  // Framework select
            Constraint::Min(6),                      // Prompt
            Constraint::Length(1),                   // Generate bar
        ])
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled(
            "Describe Your Component",
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Reusable, customizable UI components from a prompt.",
            Style::default().fg(TEXT_MUTED),
        )),
    ]);
    frame.render_widget(intro, chunks[0]);

    draw_framework_select(frame, app, chunks[1]);
    draw_prompt_input(frame, app, chunks[2]);
    draw_generate_bar(frame, app, chunks[3]);
}

fn draw_framework_select(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Framework;
    let block = Block::default()
        .title(Span::styled(
            " Framework ",
            Style::default().fg(TEXT_SECONDARY).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_for(focused)))
        .style(Style::default().bg(BG_PANEL));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, framework) in crate::backend::Framework::ALL.iter().enumerate() {
        let selected = idx == app.framework_idx;
        let (indicator, style) = if selected {
            ("› ", Style::default().fg(INDIGO).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(TEXT_SECONDARY))
        };
        lines.push(Line::from(vec![
            Span::styled(indicator, Style::default().fg(VIOLET)),
            Span::styled(framework.label(), style),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_prompt_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Prompt;
    let border_color = if focused {
        // Pulse while focused
        let glow = (app.animation_frame as f64 / 90.0).sin() * 0.3 + 0.7;
        Color::Rgb(
            (99.0 * glow) as u8,
            (102.0 * glow) as u8,
            (241.0 * glow) as u8,
        )
    } else {
        BORDER_DIM
    };

    let block = Block::default()
        .title(Span::styled(
            " Prompt ",
            Style::default().fg(TEXT_SECONDARY).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(BG_PANEL));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.prompt.is_empty() && !focused {
        let placeholder = Paragraph::new("Describe your requirement in detail and let AI code it for you")
            .style(Style::default().fg(TEXT_MUTED))
            .wrap(Wrap { trim: false });
        frame.render_widget(placeholder, inner);
        return;
    }

    let cursor = if focused && app.animation_frame % 30 < 15 {
        "|"
    } else {
        " "
    };
    let text = format!(" {}{}", app.prompt, cursor);
    let input = Paragraph::new(text)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false });
    frame.render_widget(input, inner);
}

fn draw_generate_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.is_loading() {
        Line::from(vec![
            Span::styled(spinner(app), Style::default().fg(INDIGO)),
            Span::styled(" generating", Style::default().fg(TEXT_SECONDARY).add_modifier(Modifier::ITALIC)),
            Span::styled("…", Style::default().fg(TEXT_SECONDARY)),
        ])
    } else {
        Line::from(vec![
            Span::styled("⏎ ", Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)),
            Span::styled("Generate", Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD)),
            Span::styled("   / commands", Style::default().fg(TEXT_MUTED)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ── Output panel ─────────────────────────────────────────────────

fn draw_output(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Output;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_for(focused)))
        .style(Style::default().bg(BG_PANEL));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.phase {
        Phase::Empty | Phase::Loading => draw_skeleton(frame, app, inner),
        Phase::Ready => draw_ready_output(frame, app, inner),
    }
}

fn draw_skeleton(frame: &mut Frame, app: &App, area: Rect) {
    let v_center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let lines = if app.is_loading() {
        vec![
            Line::from(Span::styled(spinner(app), Style::default().fg(INDIGO))),
            Line::from(""),
            Line::from(Span::styled(
                "Generating your component…",
                Style::default().fg(TEXT_SECONDARY).add_modifier(Modifier::ITALIC),
            )),
        ]
    } else {
        vec![
            Line::from(Span::styled(
                "</>",
                Style::default().fg(INDIGO_DEEP).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Your component and code will appear here!",
                Style::default().fg(TEXT_MUTED),
            )),
        ]
    };

    let skeleton = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(skeleton, v_center[1]);
}

fn draw_ready_output(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs + actions
            Constraint::Min(3),    // Content
        ])
        .split(area);

    draw_tabs(frame, app, chunks[0]);

    match app.view {
        View::Source => draw_source(frame, app, chunks[1]),
        View::Preview => draw_preview_pane(frame, app, chunks[1]),
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tab_style = |active: bool| {
        if active {
            Style::default()
                .fg(TEXT_PRIMARY)
                .bg(BG_PANEL_ALT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_MUTED)
        }
    };

    let tabs = Line::from(vec![
        Span::styled("  Code  ", tab_style(app.view == View::Source)),
        Span::raw(" "),
        Span::styled("  Preview  ", tab_style(app.view == View::Preview)),
    ]);
    frame.render_widget(Paragraph::new(tabs), area);

    let actions = match app.view {
        View::Source => Line::from(vec![
            Span::styled("^Y", Style::default().fg(VIOLET).add_modifier(Modifier::BOLD)),
            Span::styled(" copy  ", Style::default().fg(TEXT_MUTED)),
            Span::styled("^E", Style::default().fg(VIOLET).add_modifier(Modifier::BOLD)),
            Span::styled(" export ", Style::default().fg(TEXT_MUTED)),
        ]),
        View::Preview => Line::from(vec![
            Span::styled("^R", Style::default().fg(VIOLET).add_modifier(Modifier::BOLD)),
            Span::styled(" reload  ", Style::default().fg(TEXT_MUTED)),
            Span::styled(
                format!("run {} ", app.preview.generation),
                Style::default().fg(TEXT_MUTED),
            ),
        ]),
    };
    frame.render_widget(Paragraph::new(actions).alignment(Alignment::Right), area);
}

/// Byte index of char offset `col` in `line`.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

fn draw_source(frame: &mut Frame, app: &App, area: Rect) {
    let editable = app.editing_enabled();
    let line_count = app.code.line_count();
    let (cursor_row, cursor_col) = app.code.cursor();
    let cursor_col = cursor_col.min(app.code.line(cursor_row).chars().count());

    let gutter_width = (line_count.max(1).ilog10() as u16 + 1).max(3) + 1;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(gutter_width), Constraint::Min(10)])
        .split(area);

    let visible = area.height as usize;
    // Keep the cursor row in view; no free scrolling past it.
    let top = cursor_row.saturating_sub(visible.saturating_sub(1));

    let mut gutter_lines: Vec<Line> = Vec::new();
    let mut code_lines: Vec<Line> = Vec::new();
    let code_style = Style::default().fg(CODE_FG);

    for row in top..(top + visible).min(line_count) {
        gutter_lines.push(Line::from(Span::styled(
            format!("{:>width$} ", row + 1, width = (gutter_width - 1) as usize),
            Style::default().fg(TEXT_MUTED),
        )));

        let line = app.code.line(row);
        if editable && row == cursor_row {
            let at = byte_index(line, cursor_col);
            let (before, rest) = line.split_at(at);
            let cursor_char = rest.chars().next().unwrap_or(' ');
            let after: String = rest.chars().skip(1).collect();
            code_lines.push(Line::from(vec![
                Span::styled(before.to_string(), code_style),
                Span::styled(
                    cursor_char.to_string(),
                    code_style.add_modifier(Modifier::REVERSED),
                ),
                Span::styled(after, code_style),
            ]));
        } else {
            code_lines.push(Line::from(Span::styled(line.to_string(), code_style)));
        }
    }

    // Horizontal scroll follows the cursor's display column.
    let cursor_x: usize = app
        .code
        .line(cursor_row)
        .chars()
        .take(cursor_col)
        .map(|c| c.width().unwrap_or(0))
        .sum();
    let code_width = columns[1].width as usize;
    let h_scroll = if editable {
        (cursor_x + 1).saturating_sub(code_width)
    } else {
        0
    };

    frame.render_widget(Paragraph::new(gutter_lines), columns[0]);
    frame.render_widget(
        Paragraph::new(code_lines).scroll((0, h_scroll as u16)),
        columns[1],
    );
}

fn draw_preview_pane(frame: &mut Frame, app: &App, area: Rect) {
    let lines = preview::render(&app.code.text());

    if lines.is_empty() {
        let empty = Paragraph::new("(empty document)")
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_MUTED));
        frame.render_widget(empty, area);
        return;
    }

    let total = lines.len();
    let visible = area.height as usize;
    let max_scroll = total.saturating_sub(visible);
    let scroll = app.preview.scroll.min(max_scroll);

    let pane = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(pane, area);

    // Scroll arrows on the right edge
    if scroll > 0 {
        let up = Paragraph::new("▲").style(Style::default().fg(INDIGO));
        frame.render_widget(
            up,
            Rect { x: area.x + area.width.saturating_sub(1), y: area.y, width: 1, height: 1 },
        );
    }
    if scroll < max_scroll {
        let down = Paragraph::new("▼").style(Style::default().fg(INDIGO));
        frame.render_widget(
            down,
            Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y + area.height.saturating_sub(1),
                width: 1,
                height: 1,
            },
        );
    }
}

// ── Footer ───────────────────────────────────────────────────────

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(VIOLET).add_modifier(Modifier::BOLD));
    let text = |t: &'static str| Span::styled(t, Style::default().fg(TEXT_MUTED));

    let hints = match (app.focus, app.view) {
        (Focus::Prompt, _) => Line::from(vec![
            key("⏎"), text(" generate  "),
            key("/"), text(" cmds  "),
            key("tab"), text(" focus  "),
            key("f1"), text(" help  "),
            key("esc"), text(" quit"),
        ]),
        (Focus::Framework, _) => Line::from(vec![
            key("↑↓"), text(" framework  "),
            key("⏎"), text(" generate  "),
            key("tab"), text(" focus  "),
            key("esc"), text(" quit"),
        ]),
        (Focus::Output, View::Source) => Line::from(vec![
            text("type to edit  "),
            key("f2"), text(" preview  "),
            key("^y"), text(" copy  "),
            key("^e"), text(" export  "),
            key("tab"), text(" focus"),
        ]),
        (Focus::Output, View::Preview) => Line::from(vec![
            key("↑↓"), text(" scroll  "),
            key("f2"), text(" code  "),
            key("^r"), text(" reload  "),
            key("tab"), text(" focus"),
        ]),
    };
    frame.render_widget(Paragraph::new(hints), area);

    if let Some(notice) = &app.notice {
        let color = match notice.kind {
            NoticeKind::Info => AMBER,
            NoticeKind::Success => GREEN,
            NoticeKind::Error => RED,
        };
        let toast = Line::from(Span::styled(
            notice.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(toast).alignment(Alignment::Right), area);
    }
}

// ── Overlays ─────────────────────────────────────────────────────

fn draw_command_popup(frame: &mut Frame, app: &App, anchor: Rect) {
    let filtered = app.get_filtered_commands();
    if filtered.is_empty() {
        return;
    }

    // +1 for the "your input" row, +2 for borders
    let popup_height = (filtered.len() + 3) as u16;
    let popup_width = 46.min(anchor.width.saturating_sub(2));
    let popup_area = Rect {
        x: anchor.x + 1,
        y: anchor.y + anchor.height.saturating_sub(popup_height + 2),
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(
            " Commands ",
            Style::default().fg(VIOLET).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(VIOLET))
        .style(Style::default().bg(BG_PANEL_ALT));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = Vec::new();

    // First option: current typed input (selected when command_selection is None)
    let input_selected = app.command_selection.is_none();
    let input_style = if input_selected {
        Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_SECONDARY)
    };
    let indicator = if input_selected { ">" } else { " " };
    lines.push(Line::from(vec![
        Span::styled(format!("{} {} ", indicator, &app.prompt), input_style),
        Span::styled(
            "(your input)",
            Style::default().fg(TEXT_MUTED).add_modifier(Modifier::ITALIC),
        ),
    ]));

    for (i, (cmd, desc)) in filtered.iter().enumerate() {
        let selected = app.command_selection == Some(i);
        let style = if selected {
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_SECONDARY)
        };
        let indicator = if selected { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {} ", indicator, cmd), style),
            Span::styled(format!("- {}", desc), Style::default().fg(TEXT_MUTED)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let height = (COMMANDS.len() + 12) as u16;
    let width = 52u16.min(area.width.saturating_sub(4));
    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height: height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default().fg(INDIGO).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_ACCENT))
        .style(Style::default().bg(BG_PANEL));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), Style::default().fg(VIOLET).add_modifier(Modifier::BOLD)),
            Span::styled(desc, Style::default().fg(TEXT_SECONDARY)),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled("  Keys", Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD))),
        key("enter", "generate (newline in the code editor)"),
        key("tab", "cycle focus between panels"),
        key("f2", "toggle code / preview"),
        key("ctrl+y", "copy code to clipboard"),
        key("ctrl+e", "export code to a file"),
        key("ctrl+r", "reload the preview"),
        key("ctrl+v", "paste"),
        key("esc", "close / clear / quit"),
        Line::from(""),
        Line::from(Span::styled("  Commands", Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD))),
    ];
    for (cmd, desc) in COMMANDS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", cmd), Style::default().fg(VIOLET)),
            Span::styled(*desc, Style::default().fg(TEXT_MUTED)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
