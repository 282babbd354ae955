//! Groups command implementation.

use awis_lib::prelude::*;

/// List the response groups accepted by `url-info`.
pub(crate) fn list_groups() {
    println!("Response groups:");
    println!("{}", "-".repeat(20));
    for group in ResponseGroup::all() {
        println!("  {group}");
    }
}
