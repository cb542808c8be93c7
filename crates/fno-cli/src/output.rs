//! Console output helpers.

use tabled::{Table, Tabled};

use fno_entity::user::Role;

#[derive(Tabled)]
struct RoleLine {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// Print roles as a table.
pub fn print_roles(roles: &[Role]) {
    if roles.is_empty() {
        println!("No roles found.");
        return;
    }
    let lines: Vec<RoleLine> = roles
        .iter()
        .map(|r| RoleLine {
            id: r.id.to_string(),
            name: r.name.clone(),
        })
        .collect();
    println!("{}", Table::new(lines));
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}
