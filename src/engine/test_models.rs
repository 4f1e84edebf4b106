// ==========================================
// 引擎层单元测试用模型
// ==========================================
// Car ─┬─ Engine
//      └─ Owner ── Address
// ==========================================

use crate::domain::model::{BindEnum, BindTarget, FromFieldValue, WriteError};
use crate::domain::types::{FieldDescriptor, FieldType, FieldValue};
use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuel {
    Petrol,
    Diesel,
    Electric,
}

impl BindEnum for Fuel {
    const NAMES: &'static [&'static str] = &["Petrol", "Diesel", "Electric"];
    const VARIANTS: &'static [Self] = &[Fuel::Petrol, Fuel::Diesel, Fuel::Electric];
}

impl FromFieldValue for Fuel {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.into_enum()
    }
}

// ===== Engine =====
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Engine {
    pub kind: Option<String>,
    pub cylinders: i32,
    pub fuel: Option<Fuel>,
}

static ENGINE_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::required("Type", FieldType::Text),
    FieldDescriptor::required("Cylinders", FieldType::I32),
    FieldDescriptor::optional("Fuel", FieldType::Enum(Fuel::NAMES)),
];

impl BindTarget for Engine {
    fn type_name(&self) -> &'static str {
        "Engine"
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        &ENGINE_FIELDS
    }

    fn write_field(&mut self, name: &str, value: FieldValue) -> Result<(), WriteError> {
        match name {
            "Type" => self.kind = value.extract(name)?,
            "Cylinders" => self.cylinders = value.extract(name)?,
            "Fuel" => self.fuel = value.extract(name)?,
            _ => return Err(WriteError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn is_set(&self, name: &str) -> bool {
        match name {
            "Type" => self.kind.is_some(),
            "Fuel" => self.fuel.is_some(),
            _ => true,
        }
    }
}

// ===== Address =====
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub city: Option<String>,
}

static ADDRESS_FIELDS: [FieldDescriptor; 1] = [FieldDescriptor::required("City", FieldType::Text)];

impl BindTarget for Address {
    fn type_name(&self) -> &'static str {
        "Address"
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        &ADDRESS_FIELDS
    }

    fn write_field(&mut self, name: &str, value: FieldValue) -> Result<(), WriteError> {
        match name {
            "City" => self.city = value.extract(name)?,
            _ => return Err(WriteError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn is_set(&self, name: &str) -> bool {
        match name {
            "City" => self.city.is_some(),
            _ => true,
        }
    }
}

// ===== Owner =====
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Owner {
    pub name: Option<String>,
    pub address: Option<Address>,
}

static OWNER_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor::required("Name", FieldType::Text),
    FieldDescriptor::optional("Address", FieldType::Object("Address")),
];

impl BindTarget for Owner {
    fn type_name(&self) -> &'static str {
        "Owner"
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        &OWNER_FIELDS
    }

    fn nested_mut(&mut self, name: &str) -> Option<&mut dyn BindTarget> {
        match name {
            "Address" => self.address.as_mut().map(|a| a as &mut dyn BindTarget),
            _ => None,
        }
    }

    fn attach_default(&mut self, name: &str) -> bool {
        match name {
            "Address" => {
                self.address = Some(Address::default());
                true
            }
            _ => false,
        }
    }

    fn write_field(&mut self, name: &str, value: FieldValue) -> Result<(), WriteError> {
        match name {
            "Name" => self.name = value.extract(name)?,
            _ => return Err(WriteError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn is_set(&self, name: &str) -> bool {
        match name {
            "Name" => self.name.is_some(),
            "Address" => self.address.is_some(),
            _ => true,
        }
    }
}

// ===== Car =====
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Car {
    pub id: Uuid,
    pub name: Option<String>,
    pub year: i32,
    pub mileage: Option<f64>,
    pub registered: Option<NaiveDate>,
    pub electric: bool,
    pub tags: Option<Vec<String>>,
    pub ratings: Option<Vec<i32>>,
    pub engine: Option<Engine>,
    pub owner: Option<Owner>,
}

static CAR_FIELDS: [FieldDescriptor; 10] = [
    FieldDescriptor::required("Id", FieldType::Guid),
    FieldDescriptor::required("Name", FieldType::Text),
    FieldDescriptor::required("Year", FieldType::I32),
    FieldDescriptor::optional("Mileage", FieldType::F64),
    FieldDescriptor::optional("Registered", FieldType::Date),
    FieldDescriptor::required("Electric", FieldType::Bool),
    FieldDescriptor::optional("Tags", FieldType::List(&FieldType::Text)),
    FieldDescriptor::optional("Ratings", FieldType::List(&FieldType::I32)),
    FieldDescriptor::required("Engine", FieldType::Object("Engine")),
    FieldDescriptor::optional("Owner", FieldType::Object("Owner")),
];

impl BindTarget for Car {
    fn type_name(&self) -> &'static str {
        "Car"
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        &CAR_FIELDS
    }

    fn nested_mut(&mut self, name: &str) -> Option<&mut dyn BindTarget> {
        match name {
            "Engine" => self.engine.as_mut().map(|e| e as &mut dyn BindTarget),
            "Owner" => self.owner.as_mut().map(|o| o as &mut dyn BindTarget),
            _ => None,
        }
    }

    fn attach_default(&mut self, name: &str) -> bool {
        match name {
            "Engine" => self.engine = Some(Engine::default()),
            "Owner" => self.owner = Some(Owner::default()),
            _ => return false,
        }
        true
    }

    fn write_field(&mut self, name: &str, value: FieldValue) -> Result<(), WriteError> {
        match name {
            "Id" => self.id = value.extract(name)?,
            "Name" => self.name = value.extract(name)?,
            "Year" => self.year = value.extract(name)?,
            "Mileage" => self.mileage = value.extract(name)?,
            "Registered" => self.registered = value.extract(name)?,
            "Electric" => self.electric = value.extract(name)?,
            "Tags" => self.tags = value.extract(name)?,
            "Ratings" => self.ratings = value.extract(name)?,
            _ => return Err(WriteError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn is_set(&self, name: &str) -> bool {
        match name {
            "Name" => self.name.is_some(),
            "Mileage" => self.mileage.is_some(),
            "Registered" => self.registered.is_some(),
            "Tags" => self.tags.is_some(),
            "Ratings" => self.ratings.is_some(),
            "Engine" => self.engine.is_some(),
            "Owner" => self.owner.is_some(),
            _ => true,
        }
    }
}
