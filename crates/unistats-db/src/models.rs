use crate::fields::Fields;
use crate::upsert::{Entity, Insertable};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// University database model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct University {
    #[sqlx(rename = "id_num")]
    pub id: i64,
    pub name: String,
    pub num_undergrads: Option<i64>,
    pub cost_to_attend: Option<i64>,
    pub grad_rate: Option<f64>,
    pub public_or_private: Option<String>,
    pub city_id: Option<i64>,
}

impl Entity for University {
    const TABLE: &'static str = "UNIVERSITY";
    const COLUMNS: &'static str =
        "id_num, name, num_undergrads, cost_to_attend, grad_rate, public_or_private, city_id";
}

/// A university that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUniversity {
    pub name: String,
    pub num_undergrads: Option<i64>,
    pub cost_to_attend: Option<i64>,
    pub grad_rate: Option<f64>,
    pub public_or_private: Option<String>,
}

impl NewUniversity {
    pub fn new(
        name: impl Into<String>,
        num_undergrads: i64,
        cost_to_attend: i64,
        grad_rate: f64,
        public_or_private: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            num_undergrads: Some(num_undergrads),
            cost_to_attend: Some(cost_to_attend),
            grad_rate: Some(grad_rate),
            public_or_private: Some(public_or_private.into()),
        }
    }
}

impl Insertable for NewUniversity {
    type Entity = University;

    fn values(&self) -> Fields {
        self.attributes()
    }

    /// Universities are matched on every scalar column, not just the name
    fn attributes(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("num_undergrads", self.num_undergrads)
            .with("cost_to_attend", self.cost_to_attend)
            .with("grad_rate", self.grad_rate)
            .with("public_or_private", self.public_or_private.clone())
    }
}

/// City database model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct City {
    #[sqlx(rename = "id_num")]
    pub id: i64,
    pub name: String,
    pub population: Option<i64>,
    pub avg_tuition: Option<i64>,
    pub urban_or_rural: Option<String>,
}

impl Entity for City {
    const TABLE: &'static str = "CITY";
    const COLUMNS: &'static str = "id_num, name, population, avg_tuition, urban_or_rural";
}

/// A city that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCity {
    pub name: String,
    pub population: Option<i64>,
    pub avg_tuition: Option<i64>,
    pub urban_or_rural: Option<String>,
}

impl NewCity {
    /// A city with zeroed population and tuition aggregates
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            population: Some(0),
            avg_tuition: Some(0),
            urban_or_rural: None,
        }
    }
}

impl Insertable for NewCity {
    type Entity = City;

    fn values(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("population", self.population)
            .with("avg_tuition", self.avg_tuition)
            .with("urban_or_rural", self.urban_or_rural.clone())
    }

    fn attributes(&self) -> Fields {
        Fields::new().with("name", &self.name)
    }
}

/// Major database model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Major {
    #[sqlx(rename = "id_num")]
    pub id: i64,
    pub name: String,
    pub num_undergrads: Option<i64>,
    pub top_city: Option<String>,
    pub avg_percentage: Option<f64>,
}

impl Entity for Major {
    const TABLE: &'static str = "MAJOR";
    const COLUMNS: &'static str = "id_num, name, num_undergrads, top_city, avg_percentage";
}

/// A major that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMajor {
    pub name: String,
    pub num_undergrads: Option<i64>,
    pub top_city: Option<String>,
    pub avg_percentage: Option<f64>,
}

impl NewMajor {
    /// A major with no aggregates filled in
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_undergrads: None,
            top_city: None,
            avg_percentage: None,
        }
    }
}

impl Insertable for NewMajor {
    type Entity = Major;

    fn values(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("num_undergrads", self.num_undergrads)
            .with("top_city", self.top_city.clone())
            .with("avg_percentage", self.avg_percentage)
    }

    fn attributes(&self) -> Fields {
        Fields::new().with("name", &self.name)
    }
}

/// Ethnicity database model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Ethnicity {
    #[sqlx(rename = "id_num")]
    pub id: i64,
    pub name: String,
    pub total_count: Option<i64>,
}

impl Entity for Ethnicity {
    const TABLE: &'static str = "ETHNICITY";
    const COLUMNS: &'static str = "id_num, name, total_count";
}

/// An ethnicity that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEthnicity {
    pub name: String,
    pub total_count: Option<i64>,
}

impl NewEthnicity {
    /// An ethnicity with a zero total
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_count: Some(0),
        }
    }
}

impl Insertable for NewEthnicity {
    type Entity = Ethnicity;

    fn values(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("total_count", self.total_count)
    }

    fn attributes(&self) -> Fields {
        Fields::new().with("name", &self.name)
    }
}

/// University to major link carrying a student count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AssociationMajor {
    pub university_id: i64,
    pub major_id: i64,
    pub num_students: i64,
}

/// University to ethnicity link carrying a student count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AssociationEthnicity {
    pub university_id: i64,
    pub ethnicity_id: i64,
    pub num_students: i64,
}

/// The far side of an association row, seen from either end
///
/// From a university this names a major or ethnicity; from a major or
/// ethnicity it names a university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: i64,
    pub name: String,
    pub num_students: i64,
}
