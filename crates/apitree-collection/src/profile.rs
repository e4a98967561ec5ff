use crate::model::{Folder, Method, Request, RequestItem};
use crate::script::TestScript;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named fixture dataset the collection is built from.
///
/// Both profiles share the same four folders; `Extended` adds a second
/// POST request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Standard,
    Extended,
}

impl Profile {
    pub const ALL: [Profile; 2] = [Profile::Standard, Profile::Extended];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Standard => "standard",
            Profile::Extended => "extended",
        }
    }

    /// Folders of this profile with `base_url` substituted into every URL.
    pub fn folders(&self, base_url: &str) -> Vec<Folder> {
        let mut post_items = vec![create_post(base_url)];
        if *self == Profile::Extended {
            post_items.push(create_comment(base_url));
        }

        vec![
            Folder::new(
                "GET Requests",
                vec![get_all_users(base_url), get_single_user(base_url)],
            ),
            Folder::new("POST Requests", post_items),
            Folder::new("PUT Requests", vec![update_post(base_url)]),
            Folder::new("DELETE Requests", vec![delete_post(base_url)]),
        ]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Profile::Standard),
            "extended" => Ok(Profile::Extended),
            other => Err(Error::Config(format!(
                "unknown profile '{}' (expected one of: standard, extended)",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct PostPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u32>,
    title: &'a str,
    body: &'a str,
    #[serde(rename = "userId")]
    user_id: u32,
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    #[serde(rename = "postId")]
    post_id: u32,
    name: &'a str,
    email: &'a str,
    body: &'a str,
}

fn get_all_users(base_url: &str) -> RequestItem {
    RequestItem::new(
        "Get All Users",
        Request::new(
            Method::Get,
            format!("{}/users", base_url),
            "Retrieve a list of users",
        ),
    )
    .with_tests(
        TestScript::new()
            .status(200)
            .json_is_array("Response is an array")
            .response_time_below("Response time is less than 2000ms", 2000),
    )
}

fn get_single_user(base_url: &str) -> RequestItem {
    RequestItem::new(
        "Get Single User",
        Request::new(
            Method::Get,
            format!("{}/users/1", base_url),
            "Retrieve a single user by ID",
        ),
    )
    .with_tests(
        TestScript::new()
            .status(200)
            .field_exists("User has email", "email")
            .field_equals("User ID matches request", "id", "1"),
    )
}

fn create_post(base_url: &str) -> RequestItem {
    let payload = PostPayload {
        id: None,
        title: "Test Post",
        body: "This is a test post",
        user_id: 1,
    };

    RequestItem::new(
        "Create Post",
        Request::new(
            Method::Post,
            format!("{}/posts", base_url),
            "Create a new post",
        )
        .with_json_body(&payload),
    )
    .with_tests(
        TestScript::new()
            .status(201)
            .field_exists("Response contains title", "title")
            .field_exists("Response contains ID", "id"),
    )
}

fn create_comment(base_url: &str) -> RequestItem {
    let payload = CommentPayload {
        post_id: 1,
        name: "Test Comment",
        email: "tester@example.com",
        body: "This is a test comment",
    };

    RequestItem::new(
        "Create Comment",
        Request::new(
            Method::Post,
            format!("{}/comments", base_url),
            "Create a comment on a post",
        )
        .with_json_body(&payload),
    )
    .with_tests(
        TestScript::new()
            .status(201)
            .field_exists("Response contains email", "email")
            .field_exists("Response contains ID", "id"),
    )
}

fn update_post(base_url: &str) -> RequestItem {
    let payload = PostPayload {
        id: Some(1),
        title: "Updated Post",
        body: "This is an updated post",
        user_id: 1,
    };

    RequestItem::new(
        "Update Post",
        Request::new(
            Method::Put,
            format!("{}/posts/1", base_url),
            "Update an existing post",
        )
        .with_json_body(&payload),
    )
    .with_tests(
        TestScript::new()
            .status(200)
            .field_exists("Response contains title", "title")
            .field_exists("Response contains ID", "id"),
    )
}

fn delete_post(base_url: &str) -> RequestItem {
    RequestItem::new(
        "Delete Post",
        Request::new(
            Method::Delete,
            format!("{}/posts/1", base_url),
            "Delete a post by ID",
        ),
    )
    .with_tests(
        TestScript::new()
            .status(200)
            .response_time_below("Response time is acceptable", 2000),
    )
}
