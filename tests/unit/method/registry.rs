use super::*;
use crate::method::weave::Weave;

fn m(short: &str, fields: usize, accel: CpuFeatures) -> Arc<Method> {
    Arc::new(Method::scanline(short, short, fields, Weave).with_accel(accel))
}

fn names(reg: &MethodRegistry) -> Vec<String> {
    reg.iter().map(|m| m.short_name.clone()).collect()
}

#[test]
fn register_ignores_duplicate_allocations() {
    let mut reg = MethodRegistry::new();
    let a = m("a", 1, CpuFeatures::NONE);
    assert!(reg.register(a.clone()).unwrap());
    assert!(!reg.register(a.clone()).unwrap());
    // Same content, different allocation: a distinct method.
    assert!(reg.register(m("a", 1, CpuFeatures::NONE)).unwrap());
    assert_eq!(reg.len(), 2);
    assert!(Arc::ptr_eq(reg.get(0).unwrap(), &a));
    assert!(reg.get(2).is_none());
}

#[test]
fn register_rejects_impossible_field_depths() {
    let mut reg = MethodRegistry::new();
    assert!(matches!(
        reg.register(m("z", 0, CpuFeatures::NONE)),
        Err(DeinterlaceError::Validation(_))
    ));
    assert!(reg.register(m("five", 5, CpuFeatures::NONE)).is_err());
    assert!(reg.is_empty());
}

#[test]
fn filter_by_field_depth_preserves_order() {
    let mut reg = MethodRegistry::new();
    for (n, f) in [("one", 1), ("two", 2), ("four", 4)] {
        reg.register(m(n, f, CpuFeatures::NONE)).unwrap();
    }
    reg.filter(CpuFeatures::ALL, 2).unwrap();
    assert_eq!(names(&reg), vec!["one", "two"]);
}

#[test]
fn filter_requires_capability_subset() {
    let mut reg = MethodRegistry::new();
    reg.register(m("plain", 1, CpuFeatures::NONE)).unwrap();
    reg.register(m("mmx", 1, CpuFeatures::MMX)).unwrap();
    reg.register(m("both", 1, CpuFeatures::MMX | CpuFeatures::SSE2))
        .unwrap();
    reg.register(m("neon", 1, CpuFeatures::NEON)).unwrap();
    reg.filter(CpuFeatures::MMX | CpuFeatures::MMXEXT, 4).unwrap();
    assert_eq!(names(&reg), vec!["plain", "mmx"]);
}

#[test]
fn filter_to_empty_is_a_configuration_error() {
    let mut reg = MethodRegistry::new();
    reg.register(m("deep", 4, CpuFeatures::NONE)).unwrap();
    let err = reg.filter(CpuFeatures::ALL, 1).unwrap_err();
    assert!(matches!(err, DeinterlaceError::Configuration(_)));
    assert!(reg.is_empty());
}

#[test]
fn find_matches_short_or_full_name_case_insensitively() {
    let reg = MethodRegistry::with_builtin_methods();
    assert_eq!(reg.find("greedy2frame").unwrap().fields_required, 4);
    assert_eq!(
        reg.find("linear interpolation").unwrap().short_name,
        "Linear"
    );
    assert!(reg.find("TomsMoComp").is_none());
}
