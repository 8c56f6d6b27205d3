use std::collections::BTreeSet;

use anyhow::Context;
use holdall_nullable::{convert, Nullable};

/// A lookup that may come back empty.
fn create(found: bool) -> Nullable<String> {
    match found {
        true => Nullable::new("Godzilla".to_string()),
        false => Nullable::empty(),
    }
}

pub fn run() -> anyhow::Result<()> {
    println!("== nullable ==");

    println!("create(false) returned {}", create(false).value_or("empty".to_string()));
    if let Ok(name) = create(true).value() {
        println!("create(true) returned {}", name);
    }

    let mut set: Nullable<BTreeSet<i32>> = Nullable::empty();
    let set = set.emplace_with(|| [3, 1, 2, 1].into_iter().collect());
    println!("emplaced set: {:?}", set);

    let mut monster = "Godzilla".to_string();
    {
        let mut slot: Nullable<&mut String> = Nullable::new(&mut monster);
        if let Ok(name) = slot.value_mut() {
            **name = "Mothra".to_string();
        }
    }
    println!("monster is now {}", monster);

    let parsed: Nullable<u16> = Nullable::empty();
    if let Err(err) = parsed.value() {
        crate::report(&err);
    }

    let mut port: Nullable<u16> = Nullable::empty();
    if let Err(err) = port.try_emplace(|| "80800".parse::<u16>()) {
        crate::report(&err);
        println!("still empty: {}", !port.has_value());
    }
    port.try_emplace(|| "8080".parse::<u16>())?;
    let port = convert::into_value(port).context("the port should have been set")?;
    println!("port = {}", port);

    Ok(())
}
