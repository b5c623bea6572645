use std::collections::BTreeMap;

use serde::Serialize;
use serde::ser::{
    self, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant,
};

use crate::error::SerializeError;
use crate::Value;


impl Value {
    /// Build a [Value] from any serializable host type.
    ///
    /// Structs become [Value::Record] with their fields in declaration
    /// order, maps become [Value::Map] and sequences [Value::List].
    ///
    /// ```
    /// use moustache::Value;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct User { name: &'static str, age: u8 }
    ///
    /// let value = Value::from_serialize(&User { name: "ann", age: 7 }).unwrap();
    /// assert_eq!(value.get("age"), Some(&Value::from(7)));
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value, SerializeError> {
        value.serialize(ValueSerializer)
    }
}


pub(crate) struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = SerializeError;
    type SerializeSeq = ListSerializer;
    type SerializeTuple = ListSerializer;
    type SerializeTupleStruct = ListSerializer;
    type SerializeTupleVariant = ListSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = RecordSerializer;
    type SerializeStructVariant = RecordSerializer;

    fn serialize_bool(self, v: bool) -> Result<Value, SerializeError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, SerializeError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, SerializeError> {
        Ok(Value::List(v.iter().map(|b| Value::from(*b)).collect()))
    }

    fn serialize_none(self) -> Result<Value, SerializeError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, SerializeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, SerializeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<Value, SerializeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<Value, SerializeError> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Value, SerializeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        value: &T,
    ) -> Result<Value, SerializeError> {
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ListSerializer, SerializeError> {
        Ok(ListSerializer {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<ListSerializer, SerializeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _: &'static str,
        len: usize,
    ) -> Result<ListSerializer, SerializeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        len: usize,
    ) -> Result<ListSerializer, SerializeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapSerializer, SerializeError> {
        Ok(MapSerializer {
            map: BTreeMap::new(),
            key: None,
        })
    }

    fn serialize_struct(
        self,
        _: &'static str,
        len: usize,
    ) -> Result<RecordSerializer, SerializeError> {
        Ok(RecordSerializer {
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        len: usize,
    ) -> Result<RecordSerializer, SerializeError> {
        Ok(RecordSerializer {
            fields: Vec::with_capacity(len),
        })
    }
}


pub(crate) struct ListSerializer {
    items: Vec<Value>,
}

macro_rules! impl_serialize_seq {
    ($trait:ident, $method:ident) => {
        impl $trait for ListSerializer {
            type Ok = Value;
            type Error = SerializeError;

            fn $method<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
                self.items.push(value.serialize(ValueSerializer)?);
                Ok(())
            }

            fn end(self) -> Result<Value, SerializeError> {
                Ok(Value::List(self.items))
            }
        }
    };
}

impl_serialize_seq!(SerializeSeq, serialize_element);
impl_serialize_seq!(SerializeTuple, serialize_element);
impl_serialize_seq!(SerializeTupleStruct, serialize_field);
impl_serialize_seq!(SerializeTupleVariant, serialize_field);


pub(crate) struct MapSerializer {
    map: BTreeMap<String, Value>,
    key: Option<String>,
}

impl SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = SerializeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), SerializeError> {
        let key = match key.serialize(ValueSerializer)? {
            Value::String(s) => s,
            scalar @ (Value::Number(_) | Value::Bool(_)) => scalar.to_text(),
            Value::Null => return Err(SerializeError::KeyNotScalar("null")),
            Value::List(_) => return Err(SerializeError::KeyNotScalar("list")),
            Value::Map(_) | Value::Record(_) => return Err(SerializeError::KeyNotScalar("map")),
        };
        self.key = Some(key);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        let key = self.key.take().ok_or(SerializeError::MissingKey)?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializeError> {
        Ok(Value::Map(self.map))
    }
}


pub(crate) struct RecordSerializer {
    fields: Vec<(String, Value)>,
}

macro_rules! impl_serialize_struct {
    ($trait:ident) => {
        impl $trait for RecordSerializer {
            type Ok = Value;
            type Error = SerializeError;

            fn serialize_field<T: ?Sized + Serialize>(
                &mut self,
                key: &'static str,
                value: &T,
            ) -> Result<(), SerializeError> {
                self.fields.push((key.to_owned(), value.serialize(ValueSerializer)?));
                Ok(())
            }

            fn end(self) -> Result<Value, SerializeError> {
                Ok(Value::Record(self.fields))
            }
        }
    };
}

impl_serialize_struct!(SerializeStruct);
impl_serialize_struct!(SerializeStructVariant);


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Item {
        name: String,
        price: f64,
        tags: Vec<&'static str>,
        note: Option<String>,
    }

    #[derive(Serialize)]
    enum Kind {
        Small,
    }

    #[test]
    fn structs_become_records_in_field_order() {
        let item = Item {
            name: "pen".to_owned(),
            price: 1.5,
            tags: vec!["office"],
            note: None,
        };
        let value = Value::from_serialize(&item).unwrap();
        assert_eq!(value, Value::Record(vec![
            ("name".to_owned(), Value::from("pen")),
            ("price".to_owned(), Value::from(1.5)),
            ("tags".to_owned(), Value::List(vec![Value::from("office")])),
            ("note".to_owned(), Value::Null),
        ]));
    }

    #[test]
    fn maps_with_scalar_keys() {
        let mut map = HashMap::new();
        map.insert(1, "one");
        let value = Value::from_serialize(&map).unwrap();
        assert_eq!(value.get("1"), Some(&Value::from("one")));
    }

    #[test]
    fn maps_with_list_keys_are_rejected() {
        let mut map = HashMap::new();
        map.insert(vec![1], "one");
        assert_eq!(
            Value::from_serialize(&map),
            Err(SerializeError::KeyNotScalar("list"))
        );
    }

    #[test]
    fn unit_variants_are_names() {
        assert_eq!(Value::from_serialize(&Kind::Small).unwrap(), Value::from("Small"));
    }
}
