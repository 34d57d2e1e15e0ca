use quick_xml::{
	events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
	Writer,
};
use serde_json::{Map, Value};

use crate::errors::Error;

const XMLNS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XMLNS_XSD: &str = "http://www.w3.org/2001/XMLSchema";

/// Inventory fields for a single SKU, e.g. `HepsiburadaSku`, `MerchantSku`, `Price`, `AvailableStock`,
/// `DispatchTime`, `CargoCompany1`, `ShippingAddressLabel`.
///
/// Field names and values are passed through as given; the remote schema decides what is valid.
/// Fields keep their insertion order in the encoded document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
	fields: Vec<(String, Value)>,
}

impl Listing {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(name, value);
		self
	}

	/// Sets a field, replacing the value in place if the name is already present.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		let name = name.into();
		let value = value.into();
		match self.fields.iter_mut().find(|(n, _)| *n == name) {
			Some((_, v)) => *v = value,
			None => self.fields.push((name, value)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Encodes the listing as an inventory upload document:
	/// a namespaced `<listings>` root holding exactly one `<listing>`.
	pub fn to_xml(&self) -> Result<String, Error> {
		let mut writer = Writer::new(Vec::new());
		write(
			&mut writer,
			Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
		)?;
		let root = BytesStart::new("listings")
			.with_attributes(vec![("xmlns:xsi", XMLNS_XSI), ("xmlns:xsd", XMLNS_XSD)]);
		write(&mut writer, Event::Start(root))?;
		write(&mut writer, Event::Start(BytesStart::new("listing")))?;
		for (name, value) in &self.fields {
			write_field(&mut writer, name, value)?;
		}
		write(&mut writer, Event::End(BytesEnd::new("listing")))?;
		write(&mut writer, Event::End(BytesEnd::new("listings")))?;

		String::from_utf8(writer.into_inner()).map_err(|e| Error::Encoding(e.to_string()))
	}
}

impl<K: Into<String>, V: Into<Value>> std::iter::FromIterator<(K, V)> for Listing {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut listing = Listing::new();
		for (name, value) in iter {
			listing.insert(name, value);
		}
		listing
	}
}

impl From<Map<String, Value>> for Listing {
	fn from(map: Map<String, Value>) -> Self {
		map.into_iter().collect()
	}
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), Error> {
	writer
		.write_event(event)
		.map_err(|e| Error::Encoding(e.to_string()))
}

/// Scalars become text, objects nest, arrays repeat the element, null is an empty element.
fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<(), Error> {
	if !is_valid_element_name(name) {
		return Err(Error::Encoding(format!(
			"{:?} is not a valid XML element name",
			name
		)));
	}
	match value {
		Value::Null => write(writer, Event::Empty(BytesStart::new(name))),
		Value::Array(items) => {
			for item in items {
				write_field(writer, name, item)?;
			}
			Ok(())
		}
		Value::Object(children) => {
			write(writer, Event::Start(BytesStart::new(name)))?;
			for (child, value) in children {
				write_field(writer, child, value)?;
			}
			write(writer, Event::End(BytesEnd::new(name)))
		}
		Value::String(s) => write_text_element(writer, name, s),
		Value::Bool(b) => write_text_element(writer, name, &b.to_string()),
		Value::Number(n) => write_text_element(writer, name, &n.to_string()),
	}
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), Error> {
	if let Some(c) = text.chars().find(|c| !is_xml_char(*c)) {
		return Err(Error::Encoding(format!(
			"{:?} in field {} cannot be represented in XML 1.0",
			c, name
		)));
	}
	write(writer, Event::Start(BytesStart::new(name)))?;
	write(writer, Event::Text(BytesText::new(text)))?;
	write(writer, Event::End(BytesEnd::new(name)))
}

/// The `Char` production of XML 1.0. Surrogates are already excluded by `char`.
fn is_xml_char(c: char) -> bool {
	matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{fffd}' | '\u{10000}'..='\u{10ffff}')
}

fn is_valid_element_name(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c.is_alphabetic() || c == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}
