use holdall_any::AnyBox;

fn describe(a: &AnyBox) -> String {
    match a.type_descriptor() {
        Some(descriptor) => format!("{} ({:?})", descriptor.short_name(), descriptor.strategy()),
        None => "nothing".to_string(),
    }
}

pub fn run() -> anyhow::Result<()> {
    println!("== any ==");

    let mut a = AnyBox::new(1i32);
    println!("{}: {}", describe(&a), a.cast::<i32>()?);

    a.emplace(2.5f64);
    println!("{}: {}", describe(&a), a.cast::<f64>()?);

    a.emplace(true);
    println!("{}: {}", describe(&a), a.cast::<bool>()?);

    a.emplace("Mothra".to_string());
    println!("{}: {}", describe(&a), a.cast::<String>()?);

    a.emplace([0u64; 8]);
    println!("{}: {} words", describe(&a), a.cast::<[u64; 8]>()?.len());

    if let Err(err) = a.cast::<f32>() {
        crate::report(&err);
    }

    a.emplace(7u8);
    println!("has value: {}", a.has_value());
    a.reset();
    println!("has value after reset: {}", a.has_value());

    a.emplace(42i64);
    match a.try_cast::<i64>() {
        Some(value) => println!("try_cast found {}", value),
        None => println!("try_cast found nothing"),
    }
    println!("try_cast as i32 is none: {}", a.try_cast::<i32>().is_none());

    Ok(())
}
