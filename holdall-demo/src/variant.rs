use std::fmt::Display;

use holdall_variant::{TaggedUnion, Union3, Visitor, VisitorMut};

type Value = Union3<i32, f32, String>;

/// Bumps numbers and shouts at strings.
struct AddVisitor;

impl VisitorMut<i32> for AddVisitor {
    type Output = ();
    fn visit_mut(&mut self, value: &mut i32) {
        *value += 1;
    }
}

impl VisitorMut<f32> for AddVisitor {
    type Output = ();
    fn visit_mut(&mut self, value: &mut f32) {
        *value += 1.0;
    }
}

impl VisitorMut<String> for AddVisitor {
    type Output = ();
    fn visit_mut(&mut self, value: &mut String) {
        value.push_str(" !!!");
    }
}

struct PrintVisitor;

impl<T: Display> Visitor<T> for PrintVisitor {
    type Output = ();
    fn visit(&mut self, value: &T) {
        println!("  {}", value);
    }
}

pub fn run() -> anyhow::Result<()> {
    println!("== variant ==");

    let mut value = Value::default();
    println!("default holds alternative {} ({})", value.index(), value.active_type_name());

    value.emplace::<1>(1.5);
    value.emplace_by_type::<String, _>("hello".to_string());
    println!("now holds `{}` as {}", value.get_by_type::<String, _>()?, value.active_type_name());

    if let Err(err) = value.get::<0>() {
        crate::report(&err);
    }

    let mut values = vec![
        Value::make_by_type::<i32, _>(100),
        Value::make_by_type::<f32, _>(200.0),
        Value::make::<2>("union".to_string()),
    ];
    for value in values.iter_mut() {
        value.visit_mut(AddVisitor);
    }
    println!("after AddVisitor:");
    for value in &values {
        value.visit(PrintVisitor);
    }

    if let Err(err) = Union3::<i32, i32, String>::position_of::<i32>() {
        crate::report(&err);
    }

    Ok(())
}
