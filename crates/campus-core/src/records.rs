//! The three campus record kinds: [`Student`], [`Course`], [`Professor`].
//!
//! Flat rows with no relationships between them — no foreign keys are
//! exercised anywhere in this system. Uniqueness of the natural keys, if any,
//! is a remote-store concern.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, FieldSpec, FormError};

fn parse_integer(field: &'static str, value: &str) -> Result<i64, FormError> {
  value.parse().map_err(|_| FormError::NotAnInteger {
    field,
    value: value.to_string(),
  })
}

// ─── Student ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  pub student_id: String,
  pub name:       String,
  pub email:      String,
  pub major:      String,
}

impl Entity for Student {
  const TABLE: &'static str = "students";
  const NOUN: &'static str = "student";
  const TITLE: &'static str = "Students";

  fn fields() -> &'static [FieldSpec] {
    &[
      FieldSpec { name: "student_id", label: "Student ID" },
      FieldSpec { name: "name", label: "Name" },
      FieldSpec { name: "email", label: "Email" },
      FieldSpec { name: "major", label: "Major" },
    ]
  }

  fn from_form(values: &[String]) -> Result<Self, FormError> {
    Ok(Self {
      student_id: values[0].clone(),
      name:       values[1].clone(),
      email:      values[2].clone(),
      major:      values[3].clone(),
    })
  }

  fn to_form(&self) -> Vec<String> {
    self.cells()
  }

  fn cells(&self) -> Vec<String> {
    vec![
      self.student_id.clone(),
      self.name.clone(),
      self.email.clone(),
      self.major.clone(),
    ]
  }

  fn natural_key(&self) -> &str {
    &self.student_id
  }
}

// ─── Course ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub course_code:  String,
  pub name:         String,
  pub credit_count: i64,
  pub schedule:     String,
}

impl Entity for Course {
  const TABLE: &'static str = "courses";
  const NOUN: &'static str = "course";
  const TITLE: &'static str = "Courses";

  fn fields() -> &'static [FieldSpec] {
    &[
      FieldSpec { name: "course_code", label: "Course code" },
      FieldSpec { name: "name", label: "Name" },
      FieldSpec { name: "credit_count", label: "Credits" },
      FieldSpec { name: "schedule", label: "Schedule" },
    ]
  }

  fn from_form(values: &[String]) -> Result<Self, FormError> {
    Ok(Self {
      course_code:  values[0].clone(),
      name:         values[1].clone(),
      credit_count: parse_integer("credit_count", &values[2])?,
      schedule:     values[3].clone(),
    })
  }

  fn to_form(&self) -> Vec<String> {
    self.cells()
  }

  fn cells(&self) -> Vec<String> {
    vec![
      self.course_code.clone(),
      self.name.clone(),
      self.credit_count.to_string(),
      self.schedule.clone(),
    ]
  }

  fn natural_key(&self) -> &str {
    &self.course_code
  }
}

// ─── Professor ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
  pub professor_id: String,
  pub name:         String,
  pub email:        String,
  pub department:   String,
}

impl Entity for Professor {
  const TABLE: &'static str = "professors";
  const NOUN: &'static str = "professor";
  const TITLE: &'static str = "Professors";

  fn fields() -> &'static [FieldSpec] {
    &[
      FieldSpec { name: "professor_id", label: "Professor ID" },
      FieldSpec { name: "name", label: "Name" },
      FieldSpec { name: "email", label: "Email" },
      FieldSpec { name: "department", label: "Department" },
    ]
  }

  fn from_form(values: &[String]) -> Result<Self, FormError> {
    Ok(Self {
      professor_id: values[0].clone(),
      name:         values[1].clone(),
      email:        values[2].clone(),
      department:   values[3].clone(),
    })
  }

  fn to_form(&self) -> Vec<String> {
    self.cells()
  }

  fn cells(&self) -> Vec<String> {
    vec![
      self.professor_id.clone(),
      self.name.clone(),
      self.email.clone(),
      self.department.clone(),
    ]
  }

  fn natural_key(&self) -> &str {
    &self.professor_id
  }
}
