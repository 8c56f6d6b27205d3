use holdall_core::{short_type_name, ContainerError};
use rstest::rstest;
use std::error::Error;

#[rstest]
#[case(ContainerError::EmptyAccess { type_name: "String" }, "EmptyAccess", "no `String` value")]
#[case(ContainerError::WrongAlternative { expected: 1, active: 0 }, "WrongAlternative", "alternative 1 requested")]
#[case(ContainerError::AmbiguousAlternative { type_name: "i32", count: 2 }, "AmbiguousAlternative", "appears 2 times")]
#[case(ContainerError::BadAnyCast { expected: "f32", found: Some("i32") }, "BadAnyCast", "holds `i32`")]
#[case(ContainerError::BadAnyCast { expected: "f32", found: None }, "BadAnyCast", "box is empty")]
fn error_kinds_and_messages(#[case] error: ContainerError, #[case] kind: &str, #[case] fragment: &str) {
    assert_eq!(error.kind(), kind);
    let message = error.to_string();
    assert!(message.contains(fragment), "unexpected message: {}", message);
    assert!(error.source().is_none());
}

#[test]
fn construction_failure_keeps_its_source() {
    let error = ContainerError::construction::<Vec<u8>>(anyhow::anyhow!("out of bytes"));

    assert_eq!(error.kind(), "ConstructionFailure");
    assert!(error.to_string().contains("Vec<u8>"));
    assert_eq!(error.source().map(|e| e.to_string()), Some("out of bytes".to_string()));
}

#[rstest]
#[case(short_type_name::<i32>(), "i32")]
#[case(short_type_name::<String>(), "String")]
#[case(short_type_name::<Vec<u8>>(), "Vec<u8>")]
#[case(short_type_name::<std::collections::HashMap<u8, u8>>(), "HashMap<u8, u8>")]
#[case(short_type_name::<Vec<String>>(), "Vec<String>")]
#[case(short_type_name::<&String>(), "&String")]
#[case(short_type_name::<&mut String>(), "&mut String")]
#[case(short_type_name::<(i32, String)>(), "(i32, String)")]
#[case(short_type_name::<[String; 2]>(), "[String; 2]")]
#[case(short_type_name::<Option<&[String]>>(), "Option<&[String]>")]
#[case(short_type_name::<dyn std::any::Any>(), "dyn Any")]
fn type_names_lose_their_module_path(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(name, expected);
}

#[test]
fn shortened_names_are_stable() {
    let first = short_type_name::<(u8, String)>();
    let second = short_type_name::<(u8, String)>();
    assert_eq!(first, "(u8, String)");
    assert!(std::ptr::eq(first, second));
}
