use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::{
    ABSENT_VALUE, FIELD_META_CHANNEL, FIELD_META_SENTINEL, FIELD_META_UNIT, KEY_FORMAT_VERSION,
    MPALIST_FORMAT_VERSION, TIME_UNIT,
};

/// Creates the TIME field (timer ticks, never null)
fn time_field() -> Field {
    let mut metadata = HashMap::new();
    metadata.insert(FIELD_META_UNIT.to_string(), TIME_UNIT.to_string());
    Field::new(columns::TIME, DataType::UInt32, false).with_metadata(metadata)
}

/// Creates an `ADC<n>` field annotated with its channel and absent-value sentinel
fn channel_field(channel: u8) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert(FIELD_META_CHANNEL.to_string(), channel.to_string());
    metadata.insert(FIELD_META_SENTINEL.to_string(), ABSENT_VALUE.to_string());
    Field::new(columns::channel_column_name(channel), DataType::UInt16, false).with_metadata(metadata)
}

/// Creates the event table schema: `TIME` followed by one `ADC<n>` column per
/// channel, in the order given (callers pass channels in increasing order).
///
/// Channel columns are not nullable. An event without a sample for a channel
/// stores [`ABSENT_VALUE`] instead.
///
/// # Example
///
/// ```
/// use mpalist::schema::create_event_schema;
///
/// let schema = create_event_schema(&[0, 2]);
/// assert_eq!(schema.fields().len(), 3);
/// assert_eq!(schema.field(1).name(), "ADC0");
/// ```
pub fn create_event_schema(channels: &[u8]) -> Schema {
    let mut builder = SchemaBuilder::new();
    builder.push(time_field());
    for &channel in channels {
        builder.push(channel_field(channel));
    }

    let mut metadata = HashMap::new();
    metadata.insert(KEY_FORMAT_VERSION.to_string(), MPALIST_FORMAT_VERSION.to_string());
    builder.finish().with_metadata(metadata)
}

/// Creates the event schema wrapped in an Arc for sharing
pub fn create_event_schema_arc(channels: &[u8]) -> Arc<Schema> {
    Arc::new(create_event_schema(channels))
}
