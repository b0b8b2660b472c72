//! Machine-readable description of the HTTP surface (`OpenAPI` 3.0.0).

use serde_json::{Value, json};

pub const TITLE: &str = "Books API";
pub const VERSION: &str = "1.0.0";
pub const DESCRIPTION: &str = "A simple Books API with authentication";

/// Builds the document advertising `public_url` as the only server.
#[must_use]
pub fn document(public_url: &str) -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": TITLE,
            "version": VERSION,
            "description": DESCRIPTION,
        },
        "servers": [{ "url": public_url }],
        "components": components(),
        "security": [{ "BearerAuth": [] }],
        "paths": {
            "/api/books": {
                "get": operation(
                    "listBooks",
                    "Retrieve a list of books",
                    None,
                    &[("200", "A list of books", Some(json!({
                        "type": "array",
                        "items": book_ref(),
                    })))],
                    &["401", "500"],
                ),
                "post": operation(
                    "createBook",
                    "Create a new book",
                    Some(book_ref()),
                    &[("201", "The created book", Some(book_ref()))],
                    &["400", "401", "500"],
                ),
            },
            "/api/books/{id}": {
                "parameters": [id_parameter()],
                "get": operation(
                    "getBook",
                    "Get a book by ID",
                    None,
                    &[("200", "The book", Some(book_ref()))],
                    &["401", "404", "500"],
                ),
                "put": operation(
                    "updateBook",
                    "Update a book by ID",
                    Some(book_ref()),
                    &[("200", "The updated book", Some(book_ref()))],
                    &["400", "401", "404", "500"],
                ),
                "delete": operation(
                    "deleteBook",
                    "Delete a book by ID",
                    None,
                    &[("200", "Deletion confirmation", Some(json!({
                        "$ref": "#/components/schemas/Message",
                    })))],
                    &["401", "404", "500"],
                ),
            },
        },
    })
}

fn components() -> Value {
    json!({
        "securitySchemes": {
            "BearerAuth": {
                "type": "http",
                "scheme": "bearer",
                "bearerFormat": "JWT",
            },
        },
        "schemas": {
            "Book": {
                "type": "object",
                "required": ["title", "author", "publishedYear"],
                "properties": {
                    "id": {
                        "type": "integer",
                        "format": "int64",
                        "readOnly": true,
                        "description": "The auto-generated id of the book",
                    },
                    "title": { "type": "string", "description": "The title of the book" },
                    "author": { "type": "string", "description": "The author of the book" },
                    "publishedYear": {
                        "type": "integer",
                        "format": "int32",
                        "description": "The year the book was published",
                    },
                },
                "example": {
                    "title": "The Great Gatsby",
                    "author": "F. Scott Fitzgerald",
                    "publishedYear": 1925,
                },
            },
            "Message": {
                "type": "object",
                "properties": { "message": { "type": "string" } },
            },
            "Error": {
                "type": "object",
                "required": ["code", "message"],
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "field": { "type": "string" },
                                "message": { "type": "string" },
                            },
                        },
                    },
                },
            },
        },
    })
}

fn book_ref() -> Value {
    json!({ "$ref": "#/components/schemas/Book" })
}

fn id_parameter() -> Value {
    json!({
        "in": "path",
        "name": "id",
        "required": true,
        "schema": { "type": "integer", "format": "int64" },
        "description": "The book id",
    })
}

fn failure_description(status: &str) -> &'static str {
    match status {
        "400" => "Invalid request body",
        "401" => "Missing or invalid bearer token",
        "404" => "Book not found",
        _ => "Server error",
    }
}

fn operation(
    operation_id: &str,
    summary: &str,
    request_schema: Option<Value>,
    successes: &[(&str, &str, Option<Value>)],
    failures: &[&str],
) -> Value {
    let mut responses = serde_json::Map::new();

    for (status, description, schema) in successes {
        let mut response = json!({ "description": description });
        if let Some(schema) = schema {
            response["content"] = json!({ "application/json": { "schema": schema } });
        }
        responses.insert((*status).to_string(), response);
    }

    for status in failures {
        responses.insert(
            (*status).to_string(),
            json!({
                "description": failure_description(status),
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Error" },
                    },
                },
            }),
        );
    }

    let mut operation = json!({
        "operationId": operation_id,
        "summary": summary,
        "tags": ["Books"],
        "responses": responses,
    });

    if let Some(schema) = request_schema {
        operation["requestBody"] = json!({
            "required": true,
            "content": { "application/json": { "schema": schema } },
        });
    }

    operation
}

// =============================================================================
// Tests
// =============================================================================
