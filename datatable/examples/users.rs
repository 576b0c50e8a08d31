//! Interactive user table.
//!
//! Up/Down move, Space toggles a row, `a` toggles all, `1`-`5` sort by a
//! column, `l` flips the loading state, `q` quits. Logs go to
//! `datatable-users.log`.

use std::fs::File;
use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use datatable::render::terminal::write_view;
use datatable::{
    action_for_key, Align, Callbacks, Cell, Color, Column, DataTable, Identity, RenderOptions,
    TableOptions,
};
use log::LevelFilter;
use serde::Serialize;
use simplelog::{Config, WriteLogger};

#[derive(Debug, Clone, Serialize)]
struct User {
    id: String,
    name: String,
    email: String,
    role: String,
    status: &'static str,
    department: String,
}

fn user(id: &str, name: &str, role: &str, status: &'static str, department: &str) -> User {
    let email = format!("{}@company.com", name.to_lowercase().replace(' ', "."));
    User {
        id: id.to_string(),
        name: name.to_string(),
        email,
        role: role.to_string(),
        status,
        department: department.to_string(),
    }
}

fn sample_users() -> Vec<User> {
    vec![
        user("1", "Sarah Johnson", "Senior Developer", "active", "Engineering"),
        user("2", "Michael Chen", "Product Manager", "away", "Product"),
        user("3", "Emily Davis", "UX Designer", "active", "Design"),
        user("4", "David Wilson", "DevOps Engineer", "offline", "Engineering"),
        user("5", "Lisa Anderson", "Marketing Lead", "active", "Marketing"),
    ]
}

fn status_cell(value: &serde_json::Value, _: &User) -> Cell {
    match value.as_str().unwrap_or("") {
        "active" => Cell::text("● active").fg(Color::Green),
        "away" => Cell::text("● away").fg(Color::Yellow),
        other => Cell::text(format!("● {}", other)).dim(),
    }
}

fn columns() -> Vec<Column<User>> {
    vec![
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("role", "Role"),
        Column::new("status", "Status").align(Align::Center).render(status_cell),
        Column::new("department", "Department").sortable(false),
    ]
}

fn draw<W: Write, L: datatable::TableListener<User>>(
    out: &mut W,
    table: &DataTable<User, L>,
) -> io::Result<()> {
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    write_view(out, &table.view(), &RenderOptions::default())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("datatable-users.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut table = DataTable::new(sample_users(), columns())?
        .with_options(TableOptions::default().with_selectable(true))
        .with_identity(Identity::keyed(|u: &User| u.id.clone()))
        .with_listener(
            Callbacks::new()
                .with_row_select(|rows: &[User]| log::info!("{} rows selected", rows.len()))
                .with_sort(|key, direction| log::info!("Sort requested: {} {}", key, direction)),
        );

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = (|| -> io::Result<()> {
        draw(&mut stdout, &table)?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('l') => {
                    let loading = !table.options().loading;
                    table.set_loading(loading);
                }
                _ => {
                    if let Some(action) = action_for_key(&key) {
                        table.dispatch(action);
                    }
                }
            }
            draw(&mut stdout, &table)?;
        }
    })();

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;
    Ok(())
}
