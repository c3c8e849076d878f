use heck::{ToLowerCamelCase, ToUpperCamelCase};

use crate::parse::operation::Operation;

/// Path word runs beyond this count do not contribute to derived names.
const MAX_PATH_WORDS: usize = 10;

/// `pet_store` / `pet-store` / `petStore` → `PetStore`.
pub fn to_camel(name: &str) -> String {
    name.to_upper_camel_case()
}

/// `pet_store` / `PetStore` → `petStore`.
pub fn to_lower_camel(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Name of the generated handler for an operation.
///
/// An explicit `operationId` wins and is converted to UpperCamel case.
/// Otherwise the name is the method prefix followed by the path's word runs
/// with their first letter capitalised:
///
/// - `GET /aaa` → `GetAaa`
/// - `POST /pets/{petId}/photo_upload` → `PostPetsPetIdPhotoUpload`
pub fn operation_id(path: &str, method: &str, operation: &Operation) -> String {
    if let Some(id) = operation.operation_id.as_deref().filter(|id| !id.is_empty()) {
        return to_camel(id);
    }

    let mut name = String::from(method_prefix(method));
    for word in path_words(path).take(MAX_PATH_WORDS) {
        name.push_str(&capitalize(word));
    }
    name
}

fn method_prefix(method: &str) -> &'static str {
    match method.to_ascii_lowercase().as_str() {
        "get" => "Get",
        "post" => "Post",
        "put" => "Put",
        "patch" => "Patch",
        "delete" => "Delete",
        "update" => "Update",
        _ => "",
    }
}

/// Runs of letters and digits. Underscores separate words.
fn path_words(path: &str) -> impl Iterator<Item = &str> {
    path.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
