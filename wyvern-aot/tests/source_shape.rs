//! 对生成源码形状的端到端断言（不经过编译器）

use wyvern_aot::{BeanRegistrations, GenerationOptions, RuntimeHints};
use wyvern_core::{entry, BeanDefinition, BeanValue, ResolvableType, Role, Scope};

const CUSTOMIZER_SETTERS: [&str; 8] = [
    "set_primary",
    "set_scope",
    "set_depends_on",
    "set_lazy_init",
    "set_autowire_candidate",
    "set_synthetic",
    "set_role",
    "set_attribute",
];

fn service() -> BeanDefinition {
    BeanDefinition::of(ResolvableType::for_class("demo::UserService"))
}

fn generate_single(definition: BeanDefinition) -> String {
    generate_single_with(GenerationOptions::default(), definition)
}

fn generate_single_with(options: GenerationOptions, definition: BeanDefinition) -> String {
    let mut registrations = BeanRegistrations::with_options(options);
    registrations.add("userService", definition);
    let mut hints = RuntimeHints::new();
    registrations
        .generate(&mut hints)
        .expect("generation failed")
        .remove(0)
        .content
}

#[test]
fn test_all_default_definition_emits_no_customizer_setters() {
    let content = generate_single(service());
    for setter in CUSTOMIZER_SETTERS {
        assert!(!content.contains(setter), "unexpected `{}` in:\n{}", setter, content);
    }
}

#[test]
fn test_flipping_one_flag_emits_exactly_one_setter() {
    let cases: [(BeanDefinition, &str); 4] = [
        (service().with_primary(true), "set_primary"),
        (service().with_scope(Scope::Prototype), "set_scope"),
        (service().with_synthetic(true), "set_synthetic"),
        (service().with_role(Role::Support), "set_role"),
    ];
    for (definition, expected) in cases {
        let content = generate_single(definition);
        for setter in CUSTOMIZER_SETTERS {
            let occurrences = content.matches(setter).count();
            if setter == expected {
                assert_eq!(occurrences, 1, "expected one `{}` in:\n{}", setter, content);
            } else {
                assert_eq!(occurrences, 0, "unexpected `{}` in:\n{}", setter, content);
            }
        }
    }
}

#[test]
fn test_ordered_map_property_hoists_a_helper_function() {
    let definition = service().with_property(
        "labels",
        BeanValue::ordered_map(vec![entry("b", 2i64), entry("a", 1i64)]),
    );
    let content = generate_single(definition);
    assert!(content.contains("fn ordered_map() -> BeanValue {"));
    assert!(content.contains("entries.push(entry(\"b\", 2i64));"));
    assert!(content.contains("bd.add_property_value(\"labels\", ordered_map());"));
}

#[test]
fn test_map_entry_threshold_is_configurable() {
    let definition = service().with_property(
        "labels",
        BeanValue::map([entry("a", 1i64), entry("b", 2i64)]),
    );
    let content = generate_single_with(
        GenerationOptions::default().with_map_entry_threshold(1),
        definition,
    );
    assert!(content.contains("BeanValue::map_of_entries([entry(\"a\", 1i64), entry(\"b\", 2i64)])"));
}

#[test]
fn test_generated_files_are_byte_identical_across_runs() {
    let build = || {
        let mut registrations = BeanRegistrations::new();
        registrations.add(
            "userService",
            service()
                .with_primary(true)
                .with_property("labels", BeanValue::map([entry("b", 2i64), entry("a", 1i64)])),
        );
        registrations.add("other", BeanDefinition::of(ResolvableType::for_class("demo::Other")));
        let mut hints = RuntimeHints::new();
        registrations.generate(&mut hints).expect("generation failed")
    };
    assert_eq!(build(), build());
}
