//! Tests for the project service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockProjectRepository, MockUserRepository, ProjectRepositoryError};
use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp, project_owned_by, user};
use crate::domain::{ErrorCode, ProjectDescription, ProjectName};

type Service = ProjectService<MockProjectRepository, MockUserRepository>;

fn service(projects: MockProjectRepository, users: MockUserRepository) -> Service {
    ProjectService::new(Arc::new(projects), Arc::new(users), fixture_clock())
}

fn users_resolving(owner: User) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok((id == owner.id()).then(|| owner.clone())));
    users
}

#[tokio::test]
async fn create_makes_caller_owner_and_sole_member() {
    let owner = user("Ada");
    let owner_id = *owner.id();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_insert()
        .withf(move |project| project.owner() == &owner_id && project.members() == [owner_id])
        .times(1)
        .return_once(|_| Ok(()));

    let view = service(projects, users_resolving(owner))
        .create(
            &owner_id,
            CreateProjectRequest {
                name: ProjectName::new("Alpha").expect("valid"),
                description: ProjectDescription::default(),
            },
        )
        .await
        .expect("project created");

    assert_eq!(view.project.name().as_str(), "Alpha");
    assert_eq!(view.project.created_at(), fixture_timestamp());
    assert_eq!(view.owner.map(|o| o.id), Some(owner_id));
}

#[tokio::test]
async fn add_member_by_owner_appends_and_returns_stored_state() {
    let owner = user("Ada");
    let member = user("Brian");
    let member_id = *member.id();
    let project = project_owned_by(owner.id(), "Alpha");
    let project_id = *project.id();
    let mut stored = project.clone();
    stored.add_member(member_id);
    let mut snapshots = vec![project, stored].into_iter();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(snapshots.next()));
    projects
        .expect_add_member()
        .withf(move |project, member| *project == project_id && *member == member_id)
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut users = MockUserRepository::new();
    let owner_clone = owner.clone();
    users.expect_find_by_id().returning(move |id| {
        Ok([owner_clone.clone(), member.clone()]
            .into_iter()
            .find(|user| user.id() == id))
    });

    let view = service(projects, users)
        .add_member(owner.id(), &project_id, &member_id)
        .await
        .expect("member added");

    assert_eq!(view.project.members().len(), 2);
}

#[tokio::test]
async fn add_member_by_non_owner_is_forbidden_before_member_lookup() {
    let owner = user("Ada");
    let intruder = UserId::random();
    let project = project_owned_by(owner.id(), "Alpha");
    let project_id = *project.id();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    projects.expect_add_member().times(0);
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);

    let error = service(projects, users)
        .add_member(&intruder, &project_id, &UserId::random())
        .await
        .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn add_member_twice_does_not_write() {
    let owner = user("Ada");
    let owner_id = *owner.id();
    let project = project_owned_by(&owner_id, "Alpha");
    let project_id = *project.id();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    projects.expect_add_member().times(0);

    let view = service(projects, users_resolving(owner))
        .add_member(&owner_id, &project_id, &owner_id)
        .await
        .expect("idempotent add");

    assert_eq!(view.project.members(), [owner_id]);
}

#[tokio::test]
async fn add_unknown_member_is_not_found() {
    let owner = user("Ada");
    let owner_id = *owner.id();
    let project = project_owned_by(&owner_id, "Alpha");
    let project_id = *project.id();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    projects.expect_add_member().times(0);

    let error = service(projects, users_resolving(owner))
        .add_member(&owner_id, &project_id, &UserId::random())
        .await
        .expect_err("unknown member");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn add_member_to_project_deleted_meanwhile_is_not_found() {
    let owner = user("Ada");
    let owner_id = *owner.id();
    let member = user("Brian");
    let member_id = *member.id();
    let project = project_owned_by(&owner_id, "Alpha");
    let project_id = *project.id();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    projects
        .expect_add_member()
        .times(1)
        .return_once(|_, _| Ok(false));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(member.clone())));

    let error = service(projects, users)
        .add_member(&owner_id, &project_id, &member_id)
        .await
        .expect_err("project vanished");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case::missing_project(true)]
#[case::present_project(false)]
#[tokio::test]
async fn update_requires_existing_project_and_membership(#[case] missing: bool) {
    let owner = user("Ada");
    let project = project_owned_by(owner.id(), "Alpha");
    let project_id = *project.id();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .return_once(move |_| Ok((!missing).then_some(project)));
    projects.expect_update_details().times(0);

    let error = service(projects, MockUserRepository::new())
        .update(&UserId::random(), &project_id, ProjectPatch::default())
        .await
        .expect_err("refused");

    let expected = if missing {
        ErrorCode::NotFound
    } else {
        ErrorCode::Forbidden
    };
    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn update_by_member_writes_only_the_patch() {
    let owner = user("Ada");
    let owner_id = *owner.id();
    let project = project_owned_by(&owner_id, "Alpha");
    let project_id = *project.id();
    let patch = ProjectPatch::from_raw(Some("Beta"), Some("")).expect("valid patch");
    let mut stored = project.clone();
    stored.apply(patch.clone());
    let mut snapshots = vec![project, stored].into_iter();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(snapshots.next()));
    let expected = patch.clone();
    projects
        .expect_update_details()
        .withf(move |id, patch| *id == project_id && *patch == expected)
        .times(1)
        .return_once(|_, _| Ok(true));

    let view = service(projects, users_resolving(owner))
        .update(&owner_id, &project_id, patch)
        .await
        .expect("updated");

    assert_eq!(view.project.name().as_str(), "Beta");
    assert_eq!(view.project.description().as_str(), "");
}

#[tokio::test]
async fn empty_update_does_not_write() {
    let owner = user("Ada");
    let owner_id = *owner.id();
    let project = project_owned_by(&owner_id, "Alpha");
    let project_id = *project.id();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    projects.expect_update_details().times(0);

    let view = service(projects, users_resolving(owner))
        .update(&owner_id, &project_id, ProjectPatch::default())
        .await
        .expect("no-op update");

    assert_eq!(view.project.name().as_str(), "Alpha");
}

#[tokio::test]
async fn delete_requires_ownership() {
    let owner = user("Ada");
    let member = UserId::random();
    let mut project = project_owned_by(owner.id(), "Alpha");
    project.add_member(member);
    let project_id = *project.id();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    projects.expect_delete().times(0);

    let error = service(projects, MockUserRepository::new())
        .delete(&member, &project_id)
        .await
        .expect_err("member cannot delete");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn delete_by_owner_removes_project() {
    let owner = user("Ada");
    let project = project_owned_by(owner.id(), "Alpha");
    let project_id = *project.id();
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(project)));
    projects
        .expect_delete()
        .withf(move |id| *id == project_id)
        .times(1)
        .return_once(|_| Ok(true));

    service(projects, MockUserRepository::new())
        .delete(owner.id(), &project_id)
        .await
        .expect("deleted");
}

#[tokio::test]
async fn list_resolves_owners_in_one_lookup() {
    let ada = user("Ada");
    let brian = user("Brian");
    let alpha = project_owned_by(ada.id(), "Alpha");
    let mut beta = project_owned_by(brian.id(), "Beta");
    beta.add_member(*ada.id());
    let mut projects = MockProjectRepository::new();
    projects
        .expect_list_for_member()
        .return_once(move |_| Ok(vec![alpha, beta]));
    let mut users = MockUserRepository::new();
    let resolved = vec![ada.clone(), brian.clone()];
    users
        .expect_find_many()
        .withf(|ids| ids.len() == 2)
        .times(1)
        .return_once(move |_| Ok(resolved));

    let listed = service(projects, users)
        .list(ada.id())
        .await
        .expect("listing succeeds");

    let owners: Vec<_> = listed
        .iter()
        .map(|view| view.owner.as_ref().map(|o| o.display_name.as_str().to_owned()))
        .collect();
    assert_eq!(owners, [Some("Ada".to_owned()), Some("Brian".to_owned())]);
}

#[tokio::test]
async fn repository_failures_are_internal() {
    let mut projects = MockProjectRepository::new();
    projects
        .expect_list_for_member()
        .return_once(|_| Err(ProjectRepositoryError::query("boom")));

    let error = service(projects, MockUserRepository::new())
        .list(&UserId::random())
        .await
        .expect_err("failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
