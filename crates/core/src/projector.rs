//! Template-driven projection of JSON values
//!
//! [`project`] walks a [`Template`] and builds a new value out of a borrowed
//! source document. Each entry resolves its source path, turns the resolved
//! value into a fragment, and the fragments are folded together with
//! [`merge`]. Entries whose source path is absent contribute nothing.
//!
//! Arrays are handled by [`project_array`], which projects every element
//! through the entry's field template and calls back into [`project`].

use serde_json::{Map, Value};

use crate::merge::merge;
use crate::path::OutputKey;
use crate::template::{Template, TemplateEntry, TemplateNode};

/// Project `source` into the shape described by `template`
///
/// Never fails and never mutates the source: missing data is omitted, and the
/// result owns all of its containers.
pub fn project(source: &Value, template: &Template) -> Value {
    match template {
        Template::Paths(paths) => Value::Array(
            paths
                .iter()
                .filter_map(|path| path.resolve(source))
                .cloned()
                .collect(),
        ),
        Template::Fields(entries) => entries
            .iter()
            .filter_map(|entry| project_entry(source, entry))
            .fold(Value::Object(Map::new()), merge),
    }
}

/// Project every element of `items` through `fields`
///
/// Order and length are preserved; elements that project to an empty mapping
/// are kept. With [`OutputKey::Flatten`] the fragment is the sequence itself,
/// otherwise the sequence is placed under `key`.
pub fn project_array(items: &[Value], key: &OutputKey, fields: &Template) -> Value {
    let sequence = items.iter().map(|item| project(item, fields)).collect();
    key.place(Value::Array(sequence))
}

fn project_entry(source: &Value, entry: &TemplateEntry) -> Option<Value> {
    let Some(value) = entry.node.source().resolve(source) else {
        log::trace!(
            "skipping `{}`: `{}` is absent",
            entry.output,
            entry.node.source()
        );
        return None;
    };

    let target = entry.target();
    let fragment = match (&entry.node, value) {
        (TemplateNode::Scalar(_), value) => target.place(value.clone()),
        (
            TemplateNode::Object { fields, .. } | TemplateNode::Group { fields, .. },
            Value::Array(items),
        ) => project_array(items, target, fields),
        (TemplateNode::Object { fields, .. } | TemplateNode::Group { fields, .. }, value) => {
            target.place(project(value, fields))
        }
    };

    Some(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template(value: Value) -> Template {
        Template::from_value(&value).unwrap()
    }

    fn comment_issue() -> Value {
        json!({
            "fields": {
                "summary": "Fix bug",
                "comment": {
                    "comments": [
                        {"author": {"name": "alice"}, "body": "hi"},
                        {"author": {"name": "bob"}, "body": "yo"}
                    ]
                }
            }
        })
    }

    #[test]
    fn test_project_parallel_comment_arrays() {
        // Arrange
        let source = comment_issue();
        let template = template(json!({
            "summary": "fields.summary",
            "comment_author_name": {
                "sourcePath": "fields.comment.comments",
                "groupKey": "comment_author_name",
                "fields": {"-": "author.name"}
            },
            "comment_body": {
                "sourcePath": "fields.comment.comments",
                "groupKey": "comment_body",
                "fields": {"-": "body"}
            }
        }));

        // Act
        let result = project(&source, &template);

        // Assert
        assert_eq!(
            result,
            json!({
                "summary": "Fix bug",
                "comment_author_name": ["alice", "bob"],
                "comment_body": ["hi", "yo"]
            })
        );
    }

    #[test]
    fn test_project_missing_scalar_is_omitted() {
        let source = comment_issue();
        let template = template(json!({
            "summary": "fields.summary",
            "resolution_name": "fields.resolution.name"
        }));

        let result = project(&source, &template);

        assert_eq!(result, json!({"summary": "Fix bug"}));
        assert!(result.get("resolution_name").is_none());
    }

    #[test]
    fn test_project_absent_group_materializes_nothing() {
        let source = json!({"fields": {"summary": "Fix bug"}});
        let template = template(json!({
            "attachment_self": {
                "sourcePath": "fields.attachment",
                "groupKey": "attachment_self",
                "fields": {"self": "self"}
            }
        }));

        assert_eq!(project(&source, &template), json!({}));
    }

    #[test]
    fn test_project_present_null_is_written() {
        let source = json!({"fields": {"description": null}});
        let template = template(json!({"description": "fields.description"}));

        assert_eq!(project(&source, &template), json!({"description": null}));
    }

    #[test]
    fn test_project_dotted_output_keys_create_containers() {
        let source = comment_issue();
        let template = template(json!({
            "issue.summary": "fields.summary",
            "issue.meta.first_comment": "fields.comment.comments"
        }));

        let result = project(&source, &template);

        assert_eq!(result["issue"]["summary"], json!("Fix bug"));
        assert_eq!(
            result["issue"]["meta"]["first_comment"].as_array().map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn test_project_object_node_nests_projection() {
        let source = json!({"fields": {"project": {"name": "Core", "key": "CORE", "id": "1"}}});
        let template = template(json!({
            "project": {"sourcePath": "fields.project", "fields": {"name": "name", "code": "key"}}
        }));

        assert_eq!(
            project(&source, &template),
            json!({"project": {"name": "Core", "code": "CORE"}})
        );
    }

    #[test]
    fn test_project_flatten_object_becomes_current_level() {
        let source = json!({"fields": {"project": {"name": "Core", "key": "CORE"}}});
        let template = template(json!({
            "-": {"sourcePath": "fields.project", "fields": {"project_name": "name"}}
        }));

        assert_eq!(project(&source, &template), json!({"project_name": "Core"}));
    }

    #[test]
    fn test_project_two_scalar_groups_on_one_key_keep_both() {
        // Arrange: two nodes write scalar sequences to the same group key
        let source = json!({"c": [{"a": "alice", "b": "hi"}, {"a": "bob", "b": "yo"}]});
        let template = template(json!({
            "one": {"sourcePath": "c", "groupKey": "k", "fields": {"-": "a"}},
            "two": {"sourcePath": "c", "groupKey": "k", "fields": {"-": "b"}}
        }));

        // Act
        let result = project(&source, &template);

        // Assert: contributions concatenate in template order
        assert_eq!(result, json!({"k": ["alice", "bob", "hi", "yo"]}));
    }

    #[test]
    fn test_project_object_node_over_array_uses_output_key() {
        let source = comment_issue();
        let template = template(json!({
            "comments": {"sourcePath": "fields.comment.comments", "fields": {"body": "body"}}
        }));

        assert_eq!(
            project(&source, &template),
            json!({"comments": [{"body": "hi"}, {"body": "yo"}]})
        );
    }

    #[test]
    fn test_project_flatten_group_yields_bare_sequence() {
        // Arrange
        let source = comment_issue();
        let template = template(json!({
            "comments": {
                "sourcePath": "fields.comment.comments",
                "groupKey": "-",
                "fields": {"author_name": "author.name"}
            }
        }));

        // Act
        let result = project(&source, &template);

        // Assert: the sequence replaces the result, not {"-": [...]}
        assert_eq!(
            result,
            json!([{"author_name": "alice"}, {"author_name": "bob"}])
        );
    }

    #[test]
    fn test_project_two_groups_merge_by_index() {
        // Arrange: two nodes over the same array feeding one output key
        let source = comment_issue();
        let template = template(json!({
            "authors": {
                "sourcePath": "fields.comment.comments",
                "groupKey": "comments",
                "fields": {"author": "author.name"}
            },
            "bodies": {
                "sourcePath": "fields.comment.comments",
                "groupKey": "comments",
                "fields": {"body": "body"}
            }
        }));

        // Act
        let result = project(&source, &template);

        // Assert
        assert_eq!(
            result,
            json!({
                "comments": [
                    {"author": "alice", "body": "hi"},
                    {"author": "bob", "body": "yo"}
                ]
            })
        );
    }

    #[test]
    fn test_project_array_preserves_length_and_empty_elements() {
        // Arrange: the middle element has no `self`
        let items = vec![json!({"self": "a"}), json!({"other": 1}), json!({"self": "c"})];
        let fields = template(json!({"self": "self"}));
        let key = OutputKey::parse("attachment_self").unwrap();

        // Act
        let fragment = project_array(&items, &key, &fields);

        // Assert
        assert_eq!(
            fragment,
            json!({"attachment_self": [{"self": "a"}, {}, {"self": "c"}]})
        );
        assert_eq!(
            fragment["attachment_self"].as_array().unwrap().len(),
            items.len()
        );
    }

    #[test]
    fn test_project_array_flatten_returns_sequence() {
        let items = vec![json!({"id": 1}), json!({"id": 2})];
        let fields = template(json!({"-": "id"}));

        assert_eq!(
            project_array(&items, &OutputKey::Flatten, &fields),
            json!([1, 2])
        );
        assert_eq!(project_array(&[], &OutputKey::Flatten, &fields), json!([]));
    }

    #[test]
    fn test_project_nested_groups() {
        let source = json!({
            "sprints": [
                {"name": "S1", "issues": [{"key": "A-1"}, {"key": "A-2"}]},
                {"name": "S2", "issues": []}
            ]
        });
        let template = template(json!({
            "sprints": {
                "sourcePath": "sprints",
                "groupKey": "sprints",
                "fields": {
                    "name": "name",
                    "keys": {"sourcePath": "issues", "groupKey": "keys", "fields": {"-": "key"}}
                }
            }
        }));

        assert_eq!(
            project(&source, &template),
            json!({
                "sprints": [
                    {"name": "S1", "keys": ["A-1", "A-2"]},
                    {"name": "S2", "keys": []}
                ]
            })
        );
    }

    #[test]
    fn test_project_path_list_template() {
        let source = comment_issue();
        let template = template(json!([
            "fields.summary",
            "fields.missing",
            "fields.comment.comments"
        ]));

        let result = project(&source, &template);

        let items = result.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], json!("Fix bug"));
    }

    #[test]
    fn test_project_identity_template_is_idempotent() {
        // Arrange: project once, then run the result through keys mapped to themselves
        let source = comment_issue();
        let first = project(
            &source,
            &template(json!({
                "summary": "fields.summary",
                "comments": {
                    "sourcePath": "fields.comment.comments",
                    "groupKey": "comments",
                    "fields": {"body": "body"}
                }
            })),
        );
        let identity = template(json!({
            "summary": "summary",
            "comments": "comments"
        }));

        // Act
        let second = project(&first, &identity);

        // Assert
        assert_eq!(second, first);
    }

    #[test]
    fn test_project_follows_template_order() {
        let source = json!({"a": 1, "b": 2, "c": 3});
        let template = template(json!({"third": "c", "first": "a", "second": "b"}));

        let result = project(&source, &template);

        let keys: Vec<&String> = result.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_project_does_not_mutate_source() {
        let source = comment_issue();
        let snapshot = source.clone();
        let template = template(json!({
            "comments": {
                "sourcePath": "fields.comment.comments",
                "groupKey": "comments",
                "fields": {"body": "body"}
            }
        }));

        let _ = project(&source, &template);

        assert_eq!(source, snapshot);
    }

    #[test]
    fn test_project_empty_template_yields_empty_mapping() {
        let template = template(json!({}));

        assert!(template.is_empty());
        assert_eq!(project(&comment_issue(), &template), json!({}));
    }
}
