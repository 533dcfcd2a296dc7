//! Plain-text tables for terminal output.

use std::io::{self, Write};

use crate::domain::{FieldErrors, Role, User, join_permissions};

/// Write `users` as an aligned table with a header row.
pub fn users_table<W: Write>(out: &mut W, users: &[&User]) -> io::Result<()> {
    let rows = users
        .iter()
        .map(|user| {
            vec![
                user.id.to_string(),
                user.name.clone(),
                user.email.clone(),
                user.role.clone(),
                user.status.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    write_table(out, &["ID", "NAME", "EMAIL", "ROLE", "STATUS"], &rows)
}

/// Write `roles` as an aligned table, permissions comma-joined.
pub fn roles_table<W: Write>(out: &mut W, roles: &[Role]) -> io::Result<()> {
    let rows = roles
        .iter()
        .map(|role| {
            vec![
                role.id.to_string(),
                role.name.clone(),
                join_permissions(&role.permissions),
            ]
        })
        .collect::<Vec<_>>();
    write_table(out, &["ID", "NAME", "PERMISSIONS"], &rows)
}

/// One `field: message` line per failing field, in field order.
pub fn field_errors<W: Write>(out: &mut W, errors: &FieldErrors) -> io::Result<()> {
    for (field, message) in errors {
        writeln!(out, "{field}: {message}")?;
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells = headers.iter().map(|h| (*h).to_owned()).collect::<Vec<_>>();
    write_row(out, &widths, &header_cells)?;
    for row in rows {
        write_row(out, &widths, row)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let last = cells.len().saturating_sub(1);
    for (index, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if index == last {
            write!(out, "{cell}")?;
        } else {
            write!(out, "{cell:<width$}  ")?;
        }
    }
    writeln!(out)
}
