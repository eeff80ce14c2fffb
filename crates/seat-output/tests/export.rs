use std::fs;
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use seat_core::SlotExporter;
use seat_model::{
    Allocation, RollId, RollNames, RoomId, SeatsLeft, SessionLabel, SessionSlot, SubjectCode,
};
use seat_output::{SessionExporter, build_zip_named};
use tempfile::TempDir;

fn roll(value: &str) -> RollId {
    RollId::new(value).unwrap()
}

fn room(value: &str) -> RoomId {
    RoomId::new(value).unwrap()
}

fn slot() -> SessionSlot {
    SessionSlot::new(
        "2016-04-30",
        SessionLabel::Morning,
        vec![SubjectCode::new("CS249").unwrap(), SubjectCode::new("MM304").unwrap()],
    )
}

fn allocation() -> Allocation {
    let cs = SubjectCode::new("CS249").unwrap();
    let mm = SubjectCode::new("MM304").unwrap();
    let mut allocation = Allocation::new();
    allocation.assign(cs, room("6101"), vec![roll("1401AI01"), roll("1401AI02")]);
    allocation.assign(mm.clone(), room("6101"), vec![roll("1401MM01")]);
    allocation.assign(mm, room("6102"), vec![roll("1401MM02")]);
    allocation
}

fn seats_left() -> SeatsLeft {
    vec![(room("6101"), 7), (room("6102"), 4)].into_iter().collect()
}

fn names() -> RollNames {
    vec![
        (roll("1401AI01"), "Asha Verma".to_string()),
        (roll("1401AI02"), "Ravi Kumar".to_string()),
        (roll("1401MM01"), "Meera Das".to_string()),
        (roll("1401MM02"), "Tom & Jerry".to_string()),
    ]
    .into_iter()
    .collect()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read output")
}

fn read_xlsx(path: &Path, sheet: &str) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("open workbook");
    let range = workbook.worksheet_range(sheet).expect("read sheet");
    range.rows().map(<[Data]>::to_vec).collect()
}

#[test]
fn writes_full_report_set() {
    let dir = TempDir::new().unwrap();
    let exporter = SessionExporter::new(dir.path(), None);

    let written = exporter
        .export(&slot(), &allocation(), &seats_left(), &names())
        .unwrap();

    let session_dir = dir.path().join("2016-04-30").join("morning");
    assert_eq!(exporter.session_dir(&slot()), session_dir);
    // 2 tables x (csv + xlsx), 2 room plans, 2 attendance sheets, slips, zip
    assert_eq!(written.len(), 10);
    assert!(written.iter().all(|path| path.starts_with(&session_dir)));
    assert!(written.iter().all(|path| path.is_file()));

    let zip = written.last().unwrap();
    let zip_name = zip.file_name().unwrap().to_string_lossy().into_owned();
    assert!(zip_name.starts_with("seating_2016-04-30_morning_"));
    assert!(zip_name.ends_with(".zip"));
}

#[test]
fn overall_and_remaining_seats_tables() {
    let dir = TempDir::new().unwrap();
    SessionExporter::new(dir.path(), None)
        .without_archive()
        .export(&slot(), &allocation(), &seats_left(), &names())
        .unwrap();
    let session_dir = dir.path().join("2016-04-30").join("morning");

    insta::assert_snapshot!(read(&session_dir.join("2016-04-30_morning_overall.csv")), @r"
    Date,Session,Subject,Room,Count,Roll_Numbers
    2016-04-30,morning,CS249,6101,2,1401AI01;1401AI02
    2016-04-30,morning,MM304,6101,1,1401MM01
    2016-04-30,morning,MM304,6102,1,1401MM02
    ");

    insta::assert_snapshot!(read(&session_dir.join("remaining_seats.csv")), @r"
    Room,Seats_Left
    6101,7
    6102,4
    ");
}

#[test]
fn tables_are_also_written_as_xlsx() {
    let dir = TempDir::new().unwrap();
    SessionExporter::new(dir.path(), None)
        .without_archive()
        .export(&slot(), &allocation(), &seats_left(), &names())
        .unwrap();
    let session_dir = dir.path().join("2016-04-30").join("morning");

    let overall = read_xlsx(&session_dir.join("2016-04-30_morning_overall.xlsx"), "overall");
    assert_eq!(overall.len(), 4);
    assert_eq!(overall[0][0], Data::String("Date".to_string()));
    assert_eq!(overall[0][5], Data::String("Roll_Numbers".to_string()));
    assert_eq!(
        overall[1],
        vec![
            Data::String("2016-04-30".to_string()),
            Data::String("morning".to_string()),
            Data::String("CS249".to_string()),
            Data::String("6101".to_string()),
            Data::Float(2.0),
            Data::String("1401AI01;1401AI02".to_string()),
        ]
    );

    let seats = read_xlsx(&session_dir.join("remaining_seats.xlsx"), "remaining_seats");
    assert_eq!(
        seats,
        vec![
            vec![
                Data::String("Room".to_string()),
                Data::String("Seats_Left".to_string())
            ],
            vec![Data::String("6101".to_string()), Data::Float(7.0)],
            vec![Data::String("6102".to_string()), Data::Float(4.0)],
        ]
    );
}

#[test]
fn room_plans_follow_placement_order() {
    let zz = SubjectCode::new("ZZ9").unwrap();
    let aa = SubjectCode::new("AA1").unwrap();
    let mut allocation = Allocation::new();
    allocation.assign(zz.clone(), room("LT1"), vec![roll("Z01")]);
    allocation.assign(zz, room("6101"), vec![roll("Z02")]);
    allocation.assign(aa, room("6101"), vec![roll("A01")]);

    let dir = TempDir::new().unwrap();
    SessionExporter::new(dir.path(), None)
        .without_archive()
        .export(&slot(), &allocation, &seats_left(), &RollNames::new())
        .unwrap();
    let session_dir = dir.path().join("2016-04-30/morning");

    insta::assert_snapshot!(read(&session_dir.join("rooms/room_6101.csv")), @r"
    Seat,Subject,Roll,Name
    1,ZZ9,Z02,
    2,AA1,A01,
    ");
    insta::assert_snapshot!(read(&session_dir.join("2016-04-30_morning_overall.csv")), @r"
    Date,Session,Subject,Room,Count,Roll_Numbers
    2016-04-30,morning,ZZ9,LT1,1,Z01
    2016-04-30,morning,ZZ9,6101,1,Z02
    2016-04-30,morning,AA1,6101,1,A01
    ");
}

#[test]
fn room_plans_list_seats_in_subject_order() {
    let dir = TempDir::new().unwrap();
    SessionExporter::new(dir.path(), None)
        .without_archive()
        .export(&slot(), &allocation(), &seats_left(), &names())
        .unwrap();
    let rooms_dir = dir.path().join("2016-04-30/morning/rooms");

    insta::assert_snapshot!(read(&rooms_dir.join("room_6101.csv")), @r"
    Seat,Subject,Roll,Name
    1,CS249,1401AI01,Asha Verma
    2,CS249,1401AI02,Ravi Kumar
    3,MM304,1401MM01,Meera Das
    ");
    assert!(rooms_dir.join("room_6102.csv").is_file());
}

#[test]
fn attendance_sheet_uses_photo_when_present() {
    let dir = TempDir::new().unwrap();
    let photos = TempDir::new().unwrap();
    fs::write(photos.path().join("1401AI01.jpg"), b"jpeg").unwrap();

    SessionExporter::new(dir.path(), Some(photos.path().to_path_buf()))
        .without_archive()
        .export(&slot(), &allocation(), &seats_left(), &names())
        .unwrap();

    let html = read(
        &dir.path()
            .join("2016-04-30/morning/attendance/attendance_6101.html"),
    );
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Attendance Sheet - Room 6101"));
    assert!(html.contains("2016-04-30 - morning"));
    for column in ["Photo", "Roll Number", "Student Name", "Signature"] {
        assert!(html.contains(&format!("<th>{column}</th>")), "missing {column}");
    }
    assert!(html.contains("1401AI01.jpg"));
    // the two students without a photo file
    assert_eq!(html.matches("No Photo").count(), 2);
    assert!(html.contains("<td>Ravi Kumar</td>"));

    let other = read(
        &dir.path()
            .join("2016-04-30/morning/attendance/attendance_6102.html"),
    );
    assert!(other.contains("Tom &amp; Jerry"));
}

#[test]
fn slips_cover_every_seated_student() {
    let dir = TempDir::new().unwrap();
    SessionExporter::new(dir.path(), None)
        .without_archive()
        .export(&slot(), &allocation(), &seats_left(), &names())
        .unwrap();

    let html = read(&dir.path().join("2016-04-30/morning/student_slips.html"));
    assert_eq!(html.matches("class=\"slip\"").count(), 4);
    assert!(html.contains("<td>1401MM02</td>"));
    assert!(html.contains("<td>6102</td>"));
}

#[test]
fn archive_skips_existing_zips_and_keeps_tree() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("rooms")).unwrap();
    fs::write(root.join("remaining_seats.csv"), "Room,Seats_Left\n").unwrap();
    fs::write(root.join("rooms/room_6101.csv"), "Seat\n").unwrap();
    fs::write(root.join("old.ZIP"), b"stale").unwrap();

    let path = build_zip_named(root, "seating_test.zip").unwrap();
    let mut archive = zip::ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
    let mut entries: Vec<String> = archive.file_names().map(str::to_string).collect();
    entries.sort();
    assert_eq!(entries, vec!["remaining_seats.csv", "rooms/room_6101.csv"]);

    let mut contents = String::new();
    std::io::Read::read_to_string(&mut archive.by_name("rooms/room_6101.csv").unwrap(), &mut contents)
        .unwrap();
    assert_eq!(contents, "Seat\n");
}

#[test]
fn empty_allocation_still_writes_tables() {
    let dir = TempDir::new().unwrap();
    let written = SessionExporter::new(dir.path(), None)
        .without_archive()
        .export(&slot(), &Allocation::new(), &seats_left(), &RollNames::new())
        .unwrap();
    // overall and remaining seats as csv + xlsx, slips
    assert_eq!(written.len(), 5);
    let overall = read(&written[0]);
    assert_eq!(overall.lines().count(), 1);
}
