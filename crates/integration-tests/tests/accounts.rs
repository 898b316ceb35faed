use domains::{DomainError, FeatureFlag, PermissionsPatch, SectionId, SectionPatch, UserId, UserPatch};
use integration_tests::{seeded_services, ADMIN};

#[tokio::test]
async fn follow_toggle_moves_both_counters() {
    let services = seeded_services();
    let users = &services.users;
    let (me, target) = (UserId::from("4"), UserId::from("2"));

    let outcome = users.toggle_follow(&me, &target).await.unwrap();
    assert!(outcome.following);
    assert_eq!(outcome.actor_following, 211);
    assert_eq!(outcome.target_followers, 1_801);
    assert!(users.is_following(&me, &target).await.unwrap());

    let outcome = users.toggle_follow(&me, &target).await.unwrap();
    assert!(!outcome.following);
    assert_eq!(users.get(&me).await.unwrap().following, 210);
    assert_eq!(users.get(&target).await.unwrap().followers, 1_800);
}

#[tokio::test]
async fn follow_rules() {
    let services = seeded_services();
    let users = &services.users;

    let err = users.toggle_follow(&"1".into(), &"1".into()).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    let err = users.toggle_follow(&"1".into(), &"ghost".into()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound("User", _)));

    services
        .site
        .toggle_flag(&ADMIN.into(), FeatureFlag::AllowFollowing)
        .await
        .unwrap();
    let err = users.toggle_follow(&"1".into(), &"2".into()).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn ban_toggle_is_admin_or_permitted_supervisor_only() {
    let services = seeded_services();
    let users = &services.users;
    let target = UserId::from("3");

    // seeded supervisors lack the ban permission
    let err = users.toggle_ban(&"1".into(), &target).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    assert!(!users.toggle_ban(&ADMIN.into(), &target).await.unwrap());
    assert!(users.toggle_ban(&ADMIN.into(), &target).await.unwrap());

    services
        .supervisors
        .update_permissions(
            &ADMIN.into(),
            &"1".into(),
            PermissionsPatch {
                can_ban_user: Some(true),
                ..PermissionsPatch::default()
            },
        )
        .await
        .unwrap();
    assert!(!users.toggle_ban(&"1".into(), &target).await.unwrap());

    let err = users.toggle_ban(&"1".into(), &ADMIN.into()).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[tokio::test]
async fn profiles_are_edited_by_their_owner_or_the_admin() {
    let services = seeded_services();
    let users = &services.users;
    let patch = UserPatch {
        name: Some("Sara A.".into()),
        handle: Some("sara_a".into()),
        ..UserPatch::default()
    };

    let user = users.update(&"4".into(), &"4".into(), patch.clone()).await.unwrap();
    assert_eq!(user.name, "Sara A.");
    assert_eq!(user.handle, "@sara_a");

    let err = users.update(&"1".into(), &"4".into(), patch).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    let blank = UserPatch {
        name: Some("  ".into()),
        ..UserPatch::default()
    };
    let err = users.update(&ADMIN.into(), &"4".into(), blank).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn whatsapp_toggle_is_admin_only() {
    let services = seeded_services();
    assert!(!services.users.toggle_whatsapp(&ADMIN.into(), &"1".into()).await.unwrap());
    let err = services
        .users
        .toggle_whatsapp(&"1".into(), &"1".into())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[tokio::test]
async fn supervisor_roster_is_admin_managed() {
    let services = seeded_services();
    let supervisors = &services.supervisors;
    let admin = UserId::from(ADMIN);

    let err = supervisors.add(&"1".into(), &"4".into()).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));

    let (added, created) = supervisors.add(&admin, &"4".into()).await.unwrap();
    assert!(created);
    assert!(!added.permissions.can_delete_post);
    let (_, created) = supervisors.add(&admin, &"4".into()).await.unwrap();
    assert!(!created);
    assert_eq!(supervisors.list().await.unwrap().len(), 3);

    assert!(supervisors.permissions_for(&admin).await.unwrap().can_ban_user);
}

#[tokio::test]
async fn removing_a_supervisor_unbinds_their_sections() {
    let services = seeded_services();
    let admin = UserId::from(ADMIN);

    assert!(services.supervisors.remove(&admin, &"2".into()).await.unwrap());
    assert!(!services.supervisors.remove(&admin, &"2".into()).await.unwrap());

    let sections = services.site.sections().await.unwrap();
    let realty = sections.iter().find(|s| s.id.as_str() == "realty").unwrap();
    assert_eq!(realty.supervisor_id, None);
    let cars = sections.iter().find(|s| s.id.as_str() == "cars").unwrap();
    assert_eq!(cars.supervisor_id, Some("1".into()));
}

#[tokio::test]
async fn site_settings_are_admin_only() {
    let services = seeded_services();
    let site = &services.site;
    let admin = UserId::from(ADMIN);

    let err = site.set_site_name(&"1".into(), "Other").await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
    let settings = site.set_site_name(&admin, "  Mazad  ").await.unwrap();
    assert_eq!(settings.site_name, "Mazad");

    let settings = site
        .set_logo_url(&admin, Some("https://cdn.example/logo.png".into()))
        .await
        .unwrap();
    assert!(settings.logo_url.is_some());
    let settings = site.set_logo_url(&admin, Some(" ".into())).await.unwrap();
    assert_eq!(settings.logo_url, None);

    assert!(!site.toggle_flag(&admin, FeatureFlag::ShowTrends).await.unwrap());
    assert!(site.toggle_flag(&admin, FeatureFlag::ShowTrends).await.unwrap());
}

#[tokio::test]
async fn sections_can_be_added_reordered_and_removed() {
    let services = seeded_services();
    let site = &services.site;
    let admin = UserId::from(ADMIN);

    let section = site.add_section(&admin, "Electronics").await.unwrap();
    assert_eq!(section.icon, "Tag");
    let err = site.add_section(&admin, "Fashion").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let posted = services
        .feed
        .create_post(
            &"1".into(),
            domains::NewPost {
                content: "Phone for sale".into(),
                category: Some("Electronics".into()),
                ..domains::NewPost::default()
            },
        )
        .await;
    assert!(posted.is_ok());

    let bound = site
        .update_section(
            &admin,
            &section.id,
            SectionPatch {
                supervisor_id: Some(Some("4".into())),
                ..SectionPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(bound, DomainError::Validation(_)));

    let updated = site
        .update_section(
            &admin,
            &"cars".into(),
            SectionPatch {
                supervisor_id: Some(None),
                ..SectionPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.supervisor_id, None);

    let order: Vec<SectionId> = ["auctions", "fashion", "realty", "cars"]
        .into_iter()
        .map(SectionId::from)
        .chain([section.id.clone()])
        .collect();
    let sections = site.reorder_sections(&admin, order).await.unwrap();
    assert_eq!(sections[0].id.as_str(), "auctions");
    assert_eq!(sections[4].id, section.id);

    site.delete_section(&admin, &section.id).await.unwrap();
    let err = site.delete_section(&admin, &section.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound("Section", _)));
}

#[tokio::test]
async fn renaming_a_section_onto_another_name_conflicts() {
    let services = seeded_services();
    let site = &services.site;
    let admin = UserId::from(ADMIN);
    let rename = |name: &str| SectionPatch {
        name: Some(name.into()),
        ..SectionPatch::default()
    };

    let err = site
        .update_section(&admin, &"cars".into(), rename("Fashion"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let same = site
        .update_section(&admin, &"cars".into(), rename(" Car sales "))
        .await
        .unwrap();
    assert_eq!(same.name, "Car sales");

    let renamed = site
        .update_section(&admin, &"cars".into(), rename("Cars & bikes"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Cars & bikes");
}
