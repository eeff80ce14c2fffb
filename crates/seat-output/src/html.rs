//! Printable HTML sheets: per-room attendance and per-student seat slips.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use indexmap::IndexMap;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use seat_model::{RollNames, RoomId, Seat, SessionSlot};

use crate::common::{photo_path, write_classed_element, write_photo, write_text_element};

const STYLE: &str = "body { font-family: sans-serif; margin: 15mm; } \
table { border-collapse: collapse; width: 100%; } \
th, td { border: 1px solid #999; padding: 4px 8px; vertical-align: middle; } \
th { background: #ddd; } \
img.photo { width: 25mm; height: 30mm; } \
td.signature { width: 50mm; } \
.slip { border: 1px dashed #666; margin-bottom: 8mm; padding: 4mm; page-break-inside: avoid; }";

const ATTENDANCE_COLUMNS: [&str; 4] = ["Photo", "Roll Number", "Student Name", "Signature"];

/// Attendance sheet for one room: Photo | Roll Number | Student Name | Signature.
pub fn render_attendance(
    slot: &SessionSlot,
    room: &RoomId,
    seats: &[Seat],
    names: &RollNames,
    photos_dir: Option<&Path>,
) -> Result<String> {
    let title = format!("Attendance Sheet - Room {room}");
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    begin_document(&mut xml, &title)?;
    write_text_element(&mut xml, "h2", &title)?;
    write_classed_element(&mut xml, "p", "slot", &slot_line(slot))?;

    xml.write_event(Event::Start(BytesStart::new("table")))?;
    xml.write_event(Event::Start(BytesStart::new("thead")))?;
    xml.write_event(Event::Start(BytesStart::new("tr")))?;
    for column in ATTENDANCE_COLUMNS {
        write_text_element(&mut xml, "th", column)?;
    }
    xml.write_event(Event::End(BytesEnd::new("tr")))?;
    xml.write_event(Event::End(BytesEnd::new("thead")))?;

    xml.write_event(Event::Start(BytesStart::new("tbody")))?;
    for seat in seats {
        xml.write_event(Event::Start(BytesStart::new("tr")))?;
        let mut photo_cell = BytesStart::new("td");
        photo_cell.push_attribute(("class", "photo"));
        xml.write_event(Event::Start(photo_cell))?;
        write_photo(&mut xml, photo_path(photos_dir, &seat.roll).as_deref())?;
        xml.write_event(Event::End(BytesEnd::new("td")))?;
        write_text_element(&mut xml, "td", seat.roll.as_str())?;
        write_text_element(&mut xml, "td", names.name(&seat.roll))?;
        write_classed_element(&mut xml, "td", "signature", "")?;
        xml.write_event(Event::End(BytesEnd::new("tr")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("tbody")))?;
    xml.write_event(Event::End(BytesEnd::new("table")))?;

    end_document(xml)
}

/// One slip per seated student, grouped by room in seat order.
pub fn render_slips(
    slot: &SessionSlot,
    rooms: &IndexMap<RoomId, Vec<Seat>>,
    names: &RollNames,
    photos_dir: Option<&Path>,
) -> Result<String> {
    let title = format!("Student Seat Slips - {}", slot_line(slot));
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    begin_document(&mut xml, &title)?;
    write_text_element(&mut xml, "h2", &title)?;

    for (room, seats) in rooms {
        for (index, seat) in seats.iter().enumerate() {
            let seat_number = (index + 1).to_string();
            let mut slip = BytesStart::new("div");
            slip.push_attribute(("class", "slip"));
            xml.write_event(Event::Start(slip))?;
            write_text_element(&mut xml, "h3", "Examination Seat Slip")?;
            write_photo(&mut xml, photo_path(photos_dir, &seat.roll).as_deref())?;

            xml.write_event(Event::Start(BytesStart::new("table")))?;
            let session = slot.session.to_string();
            let fields = [
                ("Roll Number", seat.roll.as_str()),
                ("Name", names.name(&seat.roll)),
                ("Subject", seat.subject.as_str()),
                ("Room", room.as_str()),
                ("Seat", seat_number.as_str()),
                ("Date", slot.date.as_str()),
                ("Session", session.as_str()),
            ];
            for (label, value) in fields {
                xml.write_event(Event::Start(BytesStart::new("tr")))?;
                write_text_element(&mut xml, "th", label)?;
                write_text_element(&mut xml, "td", value)?;
                xml.write_event(Event::End(BytesEnd::new("tr")))?;
            }
            xml.write_event(Event::End(BytesEnd::new("table")))?;
            xml.write_event(Event::End(BytesEnd::new("div")))?;
        }
    }

    end_document(xml)
}

fn slot_line(slot: &SessionSlot) -> String {
    format!("{} - {}", slot.date, slot.session)
}

fn begin_document<W: Write>(xml: &mut Writer<W>, title: &str) -> Result<()> {
    xml.get_mut().write_all(b"<!DOCTYPE html>\n")?;
    let mut html = BytesStart::new("html");
    html.push_attribute(("lang", "en"));
    xml.write_event(Event::Start(html))?;
    xml.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "utf-8"));
    xml.write_event(Event::Empty(meta))?;
    write_text_element(xml, "title", title)?;
    xml.write_event(Event::Start(BytesStart::new("style")))?;
    xml.write_event(Event::Text(BytesText::new(STYLE)))?;
    xml.write_event(Event::End(BytesEnd::new("style")))?;
    xml.write_event(Event::End(BytesEnd::new("head")))?;
    xml.write_event(Event::Start(BytesStart::new("body")))?;
    Ok(())
}

fn end_document(mut xml: Writer<Vec<u8>>) -> Result<String> {
    xml.write_event(Event::End(BytesEnd::new("body")))?;
    xml.write_event(Event::End(BytesEnd::new("html")))?;
    let mut bytes = xml.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}
