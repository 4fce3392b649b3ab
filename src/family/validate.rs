//! Relationship symmetry check.

use super::{CheckResult, CheckStatus, FamilyMember, FamilyMemberGroup, Member};
use crate::wiki::{ArticleTitle, RelationKind};

/// Stamp a verdict on every resolved member.
///
/// A child must list the root among its parents, a parent must list the root
/// among its children, a spouse must list the root as spouse. Matching is
/// space-normalized substring containment. Members that are already checks
/// (including "Can't check") pass through untouched.
pub fn validate(root: &ArticleTitle, groups: Vec<FamilyMemberGroup>) -> Vec<FamilyMemberGroup> {
    groups
        .into_iter()
        .map(|group| {
            let kind = group.group_name;
            let members = group
                .members
                .into_iter()
                .map(|member| match member {
                    Member::Resolved(relative) => Member::Checked(verdict(root, kind, &relative)),
                    checked @ Member::Checked(_) => checked,
                })
                .collect();

            FamilyMemberGroup {
                group_name: kind,
                members,
            }
        })
        .collect()
}

fn verdict(root: &ArticleTitle, kind: RelationKind, relative: &FamilyMember) -> CheckResult {
    let claims = relative.info.get(kind.reciprocal());
    let status = if claims.iter().any(|claim| root.appears_in(claim.as_str())) {
        CheckStatus::Match
    } else {
        CheckStatus::DoesNotMatch
    };

    log::debug!(
        "{} '{}' -> {} ({} reciprocal claim(s))",
        kind,
        relative.name,
        status,
        claims.len()
    );

    CheckResult {
        name: relative.name.display_name(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::ProfileFields;
    use crate::wiki::MemberToken;

    fn member(name: &str, info: ProfileFields) -> Member {
        Member::Resolved(FamilyMember {
            name: ArticleTitle::new(name),
            info,
        })
    }

    fn group(kind: RelationKind, members: Vec<Member>) -> Vec<FamilyMemberGroup> {
        vec![FamilyMemberGroup {
            group_name: kind,
            members,
        }]
    }

    fn status_of(groups: &[FamilyMemberGroup]) -> CheckStatus {
        groups[0].members[0].as_check().unwrap().status
    }

    #[test]
    fn test_child_listing_root_as_parent_matches() {
        let info = ProfileFields {
            parents: vec![MemberToken::from("[[A]]")],
            ..Default::default()
        };
        let groups = validate(
            &ArticleTitle::new("A"),
            group(RelationKind::Children, vec![member("B", info)]),
        );
        assert_eq!(
            groups[0].members[0],
            Member::Checked(CheckResult {
                name: "B".to_string(),
                status: CheckStatus::Match,
            })
        );
    }

    #[test]
    fn test_child_without_root_does_not_match() {
        let info = ProfileFields {
            parents: vec![MemberToken::from("[[Z]]")],
            // root named in the wrong field does not count
            children: vec![MemberToken::from("[[A]]")],
            ..Default::default()
        };
        let groups = validate(
            &ArticleTitle::new("A"),
            group(RelationKind::Children, vec![member("B", info)]),
        );
        assert_eq!(status_of(&groups), CheckStatus::DoesNotMatch);
    }

    #[test]
    fn test_parent_and_spouse_use_reciprocal_fields() {
        let root = ArticleTitle::new("Alan_Turing");

        let parent = ProfileFields {
            children: vec![MemberToken::from("[[Alan Turing]]")],
            ..Default::default()
        };
        let groups = validate(&root, group(RelationKind::Parents, vec![member("Julius", parent)]));
        assert_eq!(status_of(&groups), CheckStatus::Match);

        let spouse = ProfileFields {
            spouse: vec![MemberToken::from("Alan Turing")],
            ..Default::default()
        };
        let groups = validate(&root, group(RelationKind::Spouse, vec![member("Jane", spouse)]));
        assert_eq!(status_of(&groups), CheckStatus::Match);
    }

    #[test]
    fn test_absent_field_does_not_match() {
        let groups = validate(
            &ArticleTitle::new("A"),
            group(RelationKind::Spouse, vec![member("B", ProfileFields::default())]),
        );
        assert_eq!(status_of(&groups), CheckStatus::DoesNotMatch);
    }

    #[test]
    fn test_substring_match_is_lax() {
        let info = ProfileFields {
            parents: vec![MemberToken::from("[[Jonathan Smith]]")],
            ..Default::default()
        };
        let groups = validate(
            &ArticleTitle::new("Jon"),
            group(RelationKind::Children, vec![member("Kid", info)]),
        );
        assert_eq!(status_of(&groups), CheckStatus::Match);
    }

    #[test]
    fn test_cant_check_passes_through() {
        let cant = Member::Checked(CheckResult::cant_check("Ethel Sara"));
        let groups = validate(
            &ArticleTitle::new("Ethel Sara"),
            group(RelationKind::Parents, vec![cant.clone()]),
        );
        assert_eq!(groups[0].members, vec![cant]);
    }

    #[test]
    fn test_verdict_name_uses_spaces() {
        let groups = validate(
            &ArticleTitle::new("A"),
            group(RelationKind::Spouse, vec![member("Jane_Doe", ProfileFields::default())]),
        );
        assert_eq!(groups[0].members[0].as_check().unwrap().name, "Jane Doe");
    }
}
