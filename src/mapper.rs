//! Maps decoded JSON responses onto typed records.
//!
//! Keys are lower-cased and values copied unchanged; unknown fields are kept. The lookup
//! shape decides the rest:
//!
//! - [`single`]: array, first element wins, empty array is [`Error::NotFound`].
//! - [`object`]: object mapped directly, never `NotFound`.
//! - [`list`]: array mapped in server order, truncated to an optional limit.

// self
use crate::{
	_prelude::*,
	error::TransportError,
	record::{ApiRecord, Fields, Lookup, Record, RecordKind},
};

/// Lower-cases every key of `object`, keeping values untouched.
///
/// When two keys collide after lower-casing, the one iterated last wins.
pub fn map_fields(object: serde_json::Map<String, Value>) -> Fields {
	object.into_iter().map(|(key, value)| (key.to_lowercase(), value)).collect()
}

/// Maps one JSON object into the record of `kind`.
pub fn map_record(kind: RecordKind, value: Value) -> Result<ApiRecord> {
	Ok(ApiRecord::from_fields(kind, map_fields(expect_object(value)?)))
}

/// Maps a response according to the lookup shape of `kind`.
///
/// `key` names the looked-up entity and is reported by [`Error::NotFound`]; `limit` only
/// applies to list lookups.
pub fn map(
	kind: RecordKind,
	key: &str,
	value: Value,
	limit: Option<usize>,
) -> Result<Vec<ApiRecord>> {
	match kind.lookup() {
		Lookup::Single => {
			let first = first_element(key, value)?;

			Ok(vec![map_record(kind, first)?])
		},
		Lookup::Object => Ok(vec![map_record(kind, value)?]),
		Lookup::List => expect_array(value)?
			.into_iter()
			.take(limit.unwrap_or(usize::MAX))
			.map(|element| map_record(kind, element))
			.collect(),
	}
}

/// Maps the first element of an array response, or fails with [`Error::NotFound`].
pub fn single<R>(key: &str, value: Value) -> Result<R>
where
	R: Record,
{
	let first = first_element(key, value)?;

	Ok(R::from_fields(map_fields(expect_object(first)?)))
}

/// Maps an object response directly.
pub fn object<R>(value: Value) -> Result<R>
where
	R: Record,
{
	Ok(R::from_fields(map_fields(expect_object(value)?)))
}

/// Maps every element of an array response, keeping at most `limit` in server order.
pub fn list<R>(value: Value, limit: Option<usize>) -> Result<Vec<R>>
where
	R: Record,
{
	expect_array(value)?
		.into_iter()
		.take(limit.unwrap_or(usize::MAX))
		.map(|element| Ok(R::from_fields(map_fields(expect_object(element)?))))
		.collect()
}

fn first_element(key: &str, value: Value) -> Result<Value> {
	expect_array(value)?.into_iter().next().ok_or_else(|| Error::NotFound { key: key.to_owned() })
}

fn expect_array(value: Value) -> Result<Vec<Value>> {
	match value {
		Value::Array(elements) => Ok(elements),
		other => Err(unexpected_shape("array", &other)),
	}
}

fn expect_object(value: Value) -> Result<serde_json::Map<String, Value>> {
	match value {
		Value::Object(object) => Ok(object),
		other => Err(unexpected_shape("object", &other)),
	}
}

fn unexpected_shape(expected: &'static str, found: &Value) -> Error {
	let found = match found {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	};

	TransportError::UnexpectedShape { expected, found }.into()
}
