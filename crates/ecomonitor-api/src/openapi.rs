// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

use crate::errors::API_ERROR_CODES;

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}
    })
}

fn data_response(description: &str, schema_ref: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {
            "type": "object",
            "required": ["data"],
            "properties": {"data": {"$ref": schema_ref}}
        }}}
    })
}

#[must_use]
pub fn openapi_v1_spec() -> Value {
    json!({
      "openapi": "3.0.3",
      "info": {
        "title": "EcoMonitor news API",
        "version": "v1"
      },
      "paths": {
        "/healthz": {"get": {"responses": {"200": {"description": "ok"}}}},
        "/v1/news": {
          "get": {
            "parameters": [
              {"name": "page", "in": "query", "schema": {"type": "integer", "minimum": 0}},
              {"name": "count", "in": "query", "schema": {"type": "integer", "minimum": 0, "maximum": 500}},
              {"name": "byRelevance", "in": "query", "schema": {"type": "boolean"}},
              {"name": "newerToOlder", "in": "query", "schema": {"type": "boolean"}},
              {"name": "fromDate", "in": "query", "schema": {"type": "string"}},
              {"name": "toDate", "in": "query", "schema": {"type": "string"}},
              {"name": "region_ids", "in": "query", "schema": {"type": "array", "items": {"type": "integer"}}},
              {"name": "author_ids", "in": "query", "schema": {"type": "array", "items": {"type": "string"}}},
              {"name": "company_ids", "in": "query", "schema": {"type": "array", "items": {"type": "integer"}}},
              {"name": "userId", "in": "query", "schema": {"type": "string"}}
            ],
            "responses": {
              "200": data_response("news page", "#/components/schemas/NewsPage"),
              "400": error_response("invalid query or filter"),
              "503": error_response("store timeout")
            }
          }
        },
        "/v1/news/{news_id}": {
          "get": {
            "parameters": [
              {"name": "news_id", "in": "path", "required": true, "schema": {"type": "integer", "minimum": 0}},
              {"name": "userId", "in": "query", "schema": {"type": "string"}}
            ],
            "responses": {
              "200": data_response("news item", "#/components/schemas/FormattedNews"),
              "400": error_response("invalid news id"),
              "404": error_response("news not found")
            }
          }
        },
        "/v1/news/{news_id}/like": {
          "post": {
            "parameters": [
              {"name": "news_id", "in": "path", "required": true, "schema": {"type": "integer", "minimum": 0}},
              {"name": "userId", "in": "query", "required": true, "schema": {"type": "string"}}
            ],
            "responses": {
              "200": data_response("like state after the toggle", "#/components/schemas/LikeToggle"),
              "400": error_response("invalid news or user id"),
              "401": error_response("userId is not the authenticated caller"),
              "404": error_response("news not found")
            }
          }
        },
        "/v1/openapi.json": {
          "get": {"responses": {"200": {"description": "this document"}}}
        },
        "/v1/regions/active": {
          "get": {
            "parameters": [
              {"name": "countOfRegions", "in": "query", "schema": {"type": "integer", "minimum": 0, "maximum": 20}},
              {"name": "fromDate", "in": "query", "schema": {"type": "string"}},
              {"name": "toDate", "in": "query", "schema": {"type": "string"}}
            ],
            "responses": {
              "200": {
                "description": "regions ranked by news count",
                "content": {"application/json": {"schema": {
                  "type": "object",
                  "properties": {"data": {"type": "array", "items": {"$ref": "#/components/schemas/RegionActivity"}}}
                }}}
              },
              "204": {"description": "no region has news in the window"},
              "400": error_response("invalid count or date range")
            }
          }
        },
        "/v1/regions/digest": {
          "get": {
            "parameters": [
              {"name": "regionsCount", "in": "query", "required": true, "schema": {"type": "integer", "minimum": 0, "maximum": 20}},
              {"name": "newsCount", "in": "query", "required": true, "schema": {"type": "integer", "minimum": 0, "maximum": 50}}
            ],
            "responses": {
              "200": {
                "description": "newest news of the most active regions",
                "content": {"application/json": {"schema": {
                  "type": "object",
                  "properties": {"data": {"type": "array", "items": {"$ref": "#/components/schemas/RegionDigest"}}}
                }}}
              },
              "400": error_response("invalid counts")
            }
          }
        }
      },
      "components": {
        "schemas": {
          "ApiError": {
            "type": "object",
            "additionalProperties": false,
            "required": ["code", "message", "details", "request_id"],
            "properties": {
              "code": {"type": "string", "enum": API_ERROR_CODES},
              "message": {"type": "string"},
              "details": {"type": "object"},
              "request_id": {"type": "string"}
            }
          },
          "FormattedNews": {
            "type": "object",
            "required": ["id", "title", "body", "postDate", "authors", "companies", "regions", "likeCount"],
            "properties": {
              "id": {"type": "integer"},
              "title": {"type": "string"},
              "body": {"type": "string"},
              "postDate": {"type": "string"},
              "updateDate": {"type": "string", "nullable": true},
              "sourceUrl": {"type": "string", "nullable": true},
              "authors": {"type": "array", "items": {"type": "object"}},
              "companies": {"type": "array", "items": {"type": "object"}},
              "regions": {"type": "array", "items": {"$ref": "#/components/schemas/Region"}},
              "likeCount": {"type": "integer", "minimum": 0},
              "isLikedByUser": {"type": "boolean", "description": "present only when userId was given"}
            }
          },
          "LikeToggle": {
            "type": "object",
            "required": ["newsId", "liked", "likeCount"],
            "properties": {
              "newsId": {"type": "integer"},
              "liked": {"type": "boolean"},
              "likeCount": {"type": "integer", "minimum": 0}
            }
          },
          "NewsPage": {
            "type": "object",
            "required": ["items", "remainingCount", "isItEnd"],
            "properties": {
              "items": {"type": "array", "items": {"$ref": "#/components/schemas/FormattedNews"}},
              "remainingCount": {"type": "integer", "minimum": 0},
              "isItEnd": {"type": "boolean"}
            }
          },
          "Region": {
            "type": "object",
            "required": ["id", "name"],
            "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}
          },
          "RegionActivity": {
            "type": "object",
            "required": ["region", "count", "rank"],
            "properties": {
              "region": {"$ref": "#/components/schemas/Region"},
              "count": {"type": "integer", "minimum": 1},
              "rank": {"type": "integer", "minimum": 1}
            }
          },
          "RegionDigest": {
            "type": "object",
            "required": ["region", "activityCount", "items"],
            "properties": {
              "region": {"$ref": "#/components/schemas/Region"},
              "activityCount": {"type": "integer"},
              "items": {"type": "array", "items": {"$ref": "#/components/schemas/FormattedNews"}}
            }
          }
        }
      }
    })
}
