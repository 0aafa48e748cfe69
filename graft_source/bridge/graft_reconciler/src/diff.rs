use graft_nodes::Node;
use graft_variant::{WireMap, WireValue};

/// Keys the reconciler owns; they never reach a node.
const RESERVED: [&str; 2] = ["ref", "children"];

/// The prop batch that turns `prev` into `next`: keys whose value changed or
/// is new, plus keys dropped from `next` as explicit `undefined`.
pub fn diff_props(prev: &WireMap, next: &WireMap) -> WireMap {
    let mut changed: WireMap = next
        .iter()
        .filter(|(key, _)| !is_reserved(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for (key, old) in prev {
        if is_reserved(key) {
            continue;
        }
        match next.get(key) {
            Some(new) if same_value(old, new) => {
                changed.remove(key);
            }
            Some(_) => {}
            None => {
                changed.insert(key.clone(), WireValue::Undefined);
            }
        }
    }
    changed
}

fn is_reserved(key: &str) -> bool {
    RESERVED.contains(&key)
}

/// Equal values, the same native object behind two wrappers, or arrays of
/// pairwise equal items.
pub fn same_value(a: &WireValue, b: &WireValue) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (WireValue::External(_), WireValue::External(_)) => same_node(a, b),
        (WireValue::Array(a), WireValue::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a == b || same_node(a, b))
        }
        _ => false,
    }
}

fn same_node(a: &WireValue, b: &WireValue) -> bool {
    let node = |value: &WireValue| value.as_external()?.downcast_ref::<Node>().cloned();
    match (node(a), node(b)) {
        (Some(a), Some(b)) => {
            a == b || matches!((a.native_handle(), b.native_handle()), (Some(x), Some(y)) if x == y)
        }
        _ => false,
    }
}
