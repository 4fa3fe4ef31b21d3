use std::path::PathBuf;

use serde::Serialize;

use safe_asarray::array::layout::element_count;
use safe_asarray::{asarray, Array, Config, FloatX, Order, Scalar, TypeRequest, Value};

use super::fail;

#[derive(Serialize)]
struct Report<'a> {
    dtype: &'static str,
    num: u8,
    shape: &'a [usize],
    order: String,
    data: serde_json::Value,
}

pub fn cmd_cast(
    input: &str,
    dtype: &str,
    order: Option<&str>,
    config_path: Option<PathBuf>,
    floatx: Option<&str>,
) {
    let config = resolve_config(config_path, floatx);
    let request: TypeRequest = dtype.parse().unwrap_or_else(|e| fail(e));
    let order: Option<Order> = order.map(|o| o.parse().unwrap_or_else(|e| fail(e)));
    let value = Value::from_json_str(input).unwrap_or_else(|e| fail(e));

    tracing::debug!(%request, floatx = %config.floatx, "casting");
    let array = asarray(&value, request, order, &config).unwrap_or_else(|e| fail(e));

    let report = report(&array);
    match serde_json::to_string(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

/// Config file (if any), then `SAFE_ASARRAY_FLOATX`, then `--floatx`.
fn resolve_config(path: Option<PathBuf>, floatx: Option<&str>) -> Config {
    let base = match path {
        Some(path) => Config::load(&path).unwrap_or_else(|e| fail(e)),
        None => Config::default(),
    };
    let mut config = base.with_env_overrides().unwrap_or_else(|e| fail(e));
    if let Some(floatx) = floatx {
        config.floatx = floatx.parse::<FloatX>().unwrap_or_else(|e| fail(e));
    }
    config
}

fn report(array: &Array) -> Report<'_> {
    Report {
        dtype: array.dtype().name(),
        num: array.dtype().num(),
        shape: array.shape(),
        order: array.order().to_string(),
        data: nest(&array.values(), array.shape()),
    }
}

/// Rebuild nested JSON lists from row-major values.
fn nest(values: &[Scalar], shape: &[usize]) -> serde_json::Value {
    let Some((&len, inner)) = shape.split_first() else {
        return values
            .first()
            .and_then(|v| serde_json::to_value(v).ok())
            .unwrap_or(serde_json::Value::Null);
    };
    let chunk = element_count(inner);
    let rows = (0..len)
        .map(|i| nest(&values[i * chunk..(i + 1) * chunk], inner))
        .collect();
    serde_json::Value::Array(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nest_matrix() {
        let values: Vec<Scalar> = (1..=6).map(Scalar::Int).collect();
        assert_eq!(
            nest(&values, &[2, 3]),
            serde_json::json!([[1, 2, 3], [4, 5, 6]])
        );
        assert_eq!(nest(&values[..1], &[]), serde_json::json!(1));
        assert_eq!(nest(&[], &[2, 0]), serde_json::json!([[], []]));
    }
}
