//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::{header, StatusCode};
use serde_json::json;

/// One faculty member teaching a fresh population of two students
struct Classroom {
    admin_token: String,
    faculty_token: String,
    population: TestPopulation,
    entry_id: String,
    /// (access token, roster id), sorted by name: Aarav then Bela
    students: Vec<(String, String)>,
}

async fn classroom(server: &TestServer) -> Classroom {
    let admin_token = server.admin_token().await.unwrap();

    let faculty = CreateFacultyRequest::unique();
    let response = server.post_auth("/users", &admin_token, &faculty).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    let faculty_token = server
        .login(&faculty.email, Some("faculty"))
        .await
        .unwrap()
        .access_token;

    let population = TestPopulation::unique();
    let mut tokens = Vec::new();
    for name in ["Bela", "Aarav"] {
        let request = RegisterStudentRequest::unique(&population, name);
        let response = server.post("/auth/register", &request).await.unwrap();
        let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        tokens.push((name, auth.access_token));
    }

    let response = server
        .post_auth(
            "/timetable",
            &faculty_token,
            &CreateTimetableEntryRequest::on(lecture_date(), &population),
        )
        .await
        .unwrap();
    let entry: IdResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(
            &format!("/attendance/roster?{}", population.query()),
            &faculty_token,
        )
        .await
        .unwrap();
    let roster: Vec<StudentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        roster.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        ["Aarav", "Bela"]
    );

    let students = roster
        .into_iter()
        .map(|student| {
            let token = tokens
                .iter()
                .find(|(name, _)| *name == student.name)
                .map(|(_, token)| token.clone())
                .unwrap();
            (token, student.id)
        })
        .collect();

    Classroom {
        admin_token,
        faculty_token,
        population,
        entry_id: entry.id,
        students,
    }
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_root("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_student() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterStudentRequest::unique(&TestPopulation::unique(), "Riya");

    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.profile.role, "student");
    assert_eq!(auth.profile.email, request.email);
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterStudentRequest::unique(&TestPopulation::unique(), "Riya");

    server.post("/auth/register", &request).await.unwrap();

    let mut again = request.clone();
    again.enrollment_number = format!("EN{}", unique_suffix());
    let response = server.post("/auth/register", &again).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterStudentRequest::unique(&TestPopulation::unique(), "Riya");
    request.password = "alllowercase1".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_through_wrong_portal() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterStudentRequest::unique(&TestPopulation::unique(), "Riya");
    server.post("/auth/register", &request).await.unwrap();

    let auth = server.login(&request.email, Some("student")).await.unwrap();
    assert_eq!(auth.profile.role, "student");

    let response = server
        .post(
            "/auth/login",
            &LoginRequest {
                email: request.email.clone(),
                password: TEST_PASSWORD.to_string(),
                role: Some("faculty".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login = LoginRequest {
        email: format!("nobody{}@college.edu", unique_suffix()),
        password: "WrongPass1".to_string(),
        role: None,
    };

    let response = server.post("/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterStudentRequest::unique(&TestPopulation::unique(), "Riya");
    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let old = RefreshTokenRequest {
        refresh_token: auth.refresh_token,
    };
    let response = server.post("/auth/refresh", &old).await.unwrap();
    let rotated: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rotated.profile.role, "student");

    // The previous session was revoked by the rotation
    let response = server.post("/auth/refresh", &old).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_refresh_with_same_token_rotates_once() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterStudentRequest::unique(&TestPopulation::unique(), "Riya");
    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let token = RefreshTokenRequest {
        refresh_token: auth.refresh_token,
    };
    let (first, second) = tokio::join!(
        server.post("/auth/refresh", &token),
        server.post("/auth/refresh", &token),
    );

    let mut statuses = vec![first.unwrap().status(), second.unwrap().status()];
    statuses.sort_by_key(|status| status.as_u16());
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::UNAUTHORIZED]);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterStudentRequest::unique(&TestPopulation::unique(), "Riya");
    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth("/auth/logout", &auth.access_token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post(
            "/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_me_includes_student_profile() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let population = TestPopulation::unique();
    let request = RegisterStudentRequest::unique(&population, "Riya");
    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_auth("/auth/me", &auth.access_token).await.unwrap();
    let me: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(me["profile"]["role"], "student");
    assert_eq!(me["student"]["class"], population.class.as_str());
    assert_eq!(me["student"]["enrollment_number"], request.enrollment_number.as_str());
    assert!(me.get("faculty").is_none());
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_auth("/auth/me", "not-a-jwt").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

// ============================================================================
// User Management Tests
// ============================================================================

#[tokio::test]
async fn test_user_listing_by_role() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let room = classroom(&server).await;
    let (student_token, _) = &room.students[0];

    let response = server.get_auth("/users", student_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Faculty only ever see students
    let response = server
        .get_auth(
            &format!("/users?search={}", room.population.class),
            &room.faculty_token,
        )
        .await
        .unwrap();
    let users: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u["role"] == "student"));

    let response = server
        .get_auth("/users?role=faculty", &room.admin_token)
        .await
        .unwrap();
    let users: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.iter().all(|u| u["role"] == "faculty"));
}

// ============================================================================
// Attendance and Report Tests
// ============================================================================

#[tokio::test]
async fn test_marking_feeds_reports() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let room = classroom(&server).await;
    let (aarav_token, aarav_id) = &room.students[0];

    // Duplicate ids collapse into one roster entry
    let request = MarkAttendanceRequest {
        date: lecture_date(),
        timetable_entry_id: room.entry_id.clone(),
        present_student_ids: vec![aarav_id.clone(), aarav_id.clone()],
    };
    let response = server
        .post_auth("/attendance", &room.faculty_token, &request)
        .await
        .unwrap();
    let record: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(record["present_count"], 1);

    let response = server
        .get_auth(
            &format!("/reports/class?{}", room.population.query()),
            &room.faculty_token,
        )
        .await
        .unwrap();
    let report: ClassReportResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report.total_lectures, 1);

    let aarav = report.students.iter().find(|r| r.name == "Aarav").unwrap();
    assert_eq!((aarav.attended, aarav.total, aarav.percentage), (1, 1, 100));
    assert_eq!(aarav.standing, "good");

    let bela = report.students.iter().find(|r| r.name == "Bela").unwrap();
    assert_eq!((bela.attended, bela.total, bela.percentage), (0, 1, 0));
    assert_eq!(bela.standing, "at_risk");

    let response = server.get_auth("/reports/me", aarav_token).await.unwrap();
    let summary: StudentSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.overall.percentage, 100);
    assert_eq!(summary.monthly.len(), 12);
    assert_eq!(summary.trend.len(), 1);
}

#[tokio::test]
async fn test_foreign_student_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let room = classroom(&server).await;
    let other = classroom(&server).await;

    let request = MarkAttendanceRequest {
        date: lecture_date(),
        timetable_entry_id: room.entry_id.clone(),
        present_student_ids: vec![room.students[0].1.clone(), other.students[0].1.clone()],
    };
    let response = server
        .post_auth("/attendance", &room.faculty_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth(
            &format!("/attendance?{}", room.population.query()),
            &room.faculty_token,
        )
        .await
        .unwrap();
    let records: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_marking_on_wrong_weekday() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let room = classroom(&server).await;

    let request = MarkAttendanceRequest {
        date: lecture_date().succ_opt().unwrap(),
        timetable_entry_id: room.entry_id.clone(),
        present_student_ids: vec![],
    };
    let response = server
        .post_auth("/attendance", &room.faculty_token, &request)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "LECTURE_NOT_ON_DATE");
}

#[tokio::test]
async fn test_student_reads_only_own_summary() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let room = classroom(&server).await;
    let (aarav_token, aarav_id) = &room.students[0];
    let (_, bela_id) = &room.students[1];

    let response = server
        .get_auth(&format!("/reports/students/{aarav_id}"), aarav_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/reports/students/{bela_id}"), aarav_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth(&format!("/reports/students/{bela_id}"), &room.faculty_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_class_report_export() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let room = classroom(&server).await;

    let response = server
        .get_auth(
            &format!("/reports/class/export?{}", room.population.query()),
            &room.faculty_token,
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains(&format!(
        "Attendance_Report_BCA_{}_Sem3.xlsx",
        room.population.class
    )));

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_overview_is_admin_only() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let room = classroom(&server).await;

    let response = server
        .get_auth("/reports/overview", &room.faculty_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth("/reports/overview", &room.admin_token)
        .await
        .unwrap();
    let overview: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(overview["total_students"].as_i64().unwrap() >= 2);
    assert!(overview["class_wise"].is_array());
    assert!(overview["semester_wise"].is_array());
}

// ============================================================================
// Timetable Tests
// ============================================================================

#[tokio::test]
async fn test_student_timetable_and_lectures() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let room = classroom(&server).await;
    let (student_token, _) = &room.students[0];

    let response = server.get_auth("/timetable", student_token).await.unwrap();
    let timetable: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(timetable["entries"].as_array().unwrap().len(), 1);
    assert_eq!(timetable["time_slots"][0], "09:00-10:00");

    let response = server
        .get_auth(
            &format!(
                "/timetable/lectures?{}&date={}",
                room.population.query(),
                lecture_date()
            ),
            &room.faculty_token,
        )
        .await
        .unwrap();
    let lectures: Vec<IdResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(lectures.len(), 1);
    assert_eq!(lectures[0].id, room.entry_id);
}

#[tokio::test]
async fn test_invalid_time_slot_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let room = classroom(&server).await;

    let mut entry = CreateTimetableEntryRequest::on(lecture_date(), &room.population);
    entry.end_time = "08:00".to_string();
    let response = server
        .post_auth("/timetable", &room.faculty_token, &entry)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Subject Tests
// ============================================================================

#[tokio::test]
async fn test_subject_catalog() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin_token = server.admin_token().await.unwrap();
    let name = format!("Compilers {}", unique_suffix());

    let response = server
        .post_auth("/subjects", &admin_token, &json!({ "name": name }))
        .await
        .unwrap();
    let subject: IdResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth("/subjects", &admin_token, &json!({ "name": name }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .delete_auth(&format!("/subjects/{}", subject.id), &admin_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}
