use serde_json::Value;

/// Overlay `patch` on `defaults`.
///
/// Objects merge key by key, recursively; sibling keys absent from the patch
/// survive. Anything else in the patch (scalars, arrays, `null`) replaces the
/// default wholesale. A `null` patch at the top level leaves the defaults
/// untouched, which is what an entry without `data` amounts to.
pub fn merge_patch(defaults: Value, patch: &Value) -> Value {
    if patch.is_null() {
        return defaults;
    }
    let mut merged = defaults;
    merge_into(&mut merged, patch);
    merged
}

fn merge_into(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                match target_map.get_mut(key) {
                    Some(existing) => merge_into(existing, patch_value),
                    None => {
                        target_map.insert(key.clone(), patch_value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}
