extern crate image;
extern crate imageproc;

use crate::config;
use crate::fonts::Typeface;
use crate::result;
use crate::structs;

pub struct Styles {
    pub font: Typeface,
    pub font_bold: Typeface,
}

impl Styles {
    pub fn load(config: &config::Config) -> Styles {
        let font = Typeface::load(config.font_path.as_deref());
        let font_bold = match config.bold_font_path {
            Some(ref path) => match Typeface::load(Some(path.as_path())) {
                Typeface::Bitmap => font.clone(),
                bold => bold,
            },
            None => font.clone(),
        };
        return Styles {
            font: font,
            font_bold: font_bold,
        };
    }

    /// Built-in bitmap font only; needs no assets.
    pub fn fallback() -> Styles {
        return Styles {
            font: Typeface::Bitmap,
            font_bold: Typeface::Bitmap,
        };
    }
}

pub const BOARD_WIDTH: u32 = 240;
pub const BOARD_HEIGHT: u32 = 240;
pub const JPEG_QUALITY: u8 = 95;

pub const DEPARTURES_IMAGE: &str = "departures.jpg";
pub const TASKS_IMAGE: &str = "todoist_today.jpg";

const fn rgb(hex: u32) -> image::Rgb<u8> {
    return image::Rgb([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]);
}

const WHITE: image::Rgb<u8> = rgb(0xFFFFFF);
const GRID_COLOR: image::Rgb<u8> = rgb(0x2a2a2a);
const CAPTION_COLOR: image::Rgb<u8> = rgb(0x888888);

// Departures board.
const DEP_BG_COLOR: image::Rgb<u8> = rgb(0x000000);
const DEP_HEADER_COLOR: image::Rgb<u8> = rgb(0x1a1a1a);
const DEP_ROW_TINT: image::Rgb<u8> = rgb(0x0a0a0a);
const DEP_LIVE_COLOR: image::Rgb<u8> = rgb(0xFFA500);
const DEP_DESTINATION_COLOR: image::Rgb<u8> = rgb(0xCCCCCC);
const DEP_LATER_TIMES_COLOR: image::Rgb<u8> = rgb(0x999999);
const DEP_FALLBACK_ROUTE_COLOR: image::Rgb<u8> = rgb(0x888888);

const DEP_HEADER_HEIGHT: i32 = 28;
const DEP_FIRST_ROW_Y: i32 = 50;
const DEP_ROW_HEIGHT: i32 = 47;
const DEP_DESTINATION_X: i32 = 80;
pub const DESTINATION_MAX_CHARS: usize = 11;

// Tasks board.
const TASK_BG_COLOR: image::Rgb<u8> = rgb(0x1a1a1a);
const TASK_ROW_TINT: image::Rgb<u8> = rgb(0x202020);
const TASK_ACCENT_COLOR: image::Rgb<u8> = rgb(0xde4c4a);
const TASK_COMPLETED_COLOR: image::Rgb<u8> = rgb(0x6b6b6b);
const TASK_DUE_COLOR: image::Rgb<u8> = rgb(0x666666);

const TASK_FIRST_ROW_Y: i32 = 58;
const TASK_ROW_HEIGHT: i32 = 30;
const TASK_CHECKBOX_X: i32 = 12;
const TASK_CHECKBOX_SIZE: i32 = 16;
const TASK_CONTENT_X: i32 = TASK_CHECKBOX_X + TASK_CHECKBOX_SIZE + 10;
pub const TASK_MAX_CHARS: usize = 26;

fn priority_color(priority: u8) -> image::Rgb<u8> {
    match priority {
        4 => rgb(0xd1453b),
        3 => rgb(0xeb8909),
        2 => rgb(0x4073ff),
        _ => rgb(0x808080),
    }
}

/// Parses "#RRGGBB" or "#RGB", with or without the '#'.
pub fn parse_hex_color(raw: &str) -> Option<image::Rgb<u8>> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let value = u32::from_str_radix(hex, 16).ok()?;
            return Some(rgb(value));
        },
        3 => {
            let value = u32::from_str_radix(hex, 16).ok()?;
            let (r, g, b) = ((value >> 8) & 0xf, (value >> 4) & 0xf, value & 0xf);
            return Some(image::Rgb([(r * 17) as u8, (g * 17) as u8, (b * 17) as u8]));
        },
        _ => return None,
    }
}

/// Keeps at most `max_chars` characters, ending in `marker` when cut.
pub fn truncate_chars(text: &str, max_chars: usize, marker: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(marker.chars().count());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(marker);
    return truncated;
}

pub fn destination_text(destination: &str) -> String {
    return truncate_chars(destination, DESTINATION_MAX_CHARS, "\u{2026}");
}

pub fn task_text(content: &str) -> String {
    return truncate_chars(content, TASK_MAX_CHARS, "...");
}

/// Drops trailing characters until `text` fits in `max_width` pixels.
fn fit_to_width(font: &Typeface, size: f32, text: &str, max_width: i32) -> String {
    let mut fitted: String = text.to_string();
    while !fitted.is_empty() && font.text_width(size, &fitted) > max_width {
        fitted.pop();
    }
    return fitted;
}

fn draw_hline(imgbuf: &mut image::RgbImage, x0: i32, x1: i32, y: i32, thickness: u32, color: image::Rgb<u8>) {
    if x1 <= x0 {
        return;
    }
    imageproc::drawing::draw_filled_rect_mut(
        imgbuf,
        imageproc::rect::Rect::at(x0, y).of_size((x1 - x0) as u32, thickness),
        color);
}

fn draw_band(imgbuf: &mut image::RgbImage, y: i32, height: i32, color: image::Rgb<u8>) {
    imageproc::drawing::draw_filled_rect_mut(
        imgbuf,
        imageproc::rect::Rect::at(0, y).of_size(BOARD_WIDTH, height as u32),
        color);
}

fn draw_centered_text(imgbuf: &mut image::RgbImage, font: &Typeface, color: image::Rgb<u8>, y: i32, size: f32, text: &str) {
    let width = font.text_width(size, text);
    let x = (BOARD_WIDTH as i32 - width) / 2;
    font.draw_text(imgbuf, color, x, y, size, text);
}

pub fn generate_departures_image(rows: &[structs::DepartureRow], clock: &str, styles: &Styles) -> image::RgbImage {
    let mut imgbuf = image::RgbImage::from_pixel(BOARD_WIDTH, BOARD_HEIGHT, DEP_BG_COLOR);

    draw_departures_header(&mut imgbuf, styles, clock);

    if rows.is_empty() {
        draw_centered_text(&mut imgbuf, &styles.font_bold, CAPTION_COLOR, 120, 16.0, "No departures");
        return imgbuf;
    }

    for (i, row) in rows.iter().take(structs::MAX_DEPARTURES).enumerate() {
        let y = DEP_FIRST_ROW_Y + i as i32 * DEP_ROW_HEIGHT;
        draw_departure_row(&mut imgbuf, styles, row, y, i % 2 == 1);

        if i + 1 < rows.len().min(structs::MAX_DEPARTURES) {
            draw_hline(&mut imgbuf, 8, BOARD_WIDTH as i32 - 8, y + DEP_ROW_HEIGHT - 2, 1, GRID_COLOR);
        }
    }

    return imgbuf;
}

fn draw_departures_header(imgbuf: &mut image::RgbImage, styles: &Styles, clock: &str) {
    draw_band(imgbuf, 0, DEP_HEADER_HEIGHT, DEP_HEADER_COLOR);
    styles.font_bold.draw_text(imgbuf, WHITE, 8, 6, 16.0, "DEPARTURES");

    let clock_width = styles.font_bold.text_width(16.0, clock);
    styles.font_bold.draw_text(
        imgbuf, CAPTION_COLOR, BOARD_WIDTH as i32 - clock_width - 8, 6, 16.0, clock);

    draw_hline(imgbuf, 0, BOARD_WIDTH as i32, DEP_HEADER_HEIGHT, 2, GRID_COLOR);

    styles.font.draw_text(imgbuf, CAPTION_COLOR, 8, 32, 9.0, "LINE");
    styles.font.draw_text(imgbuf, CAPTION_COLOR, 65, 32, 9.0, "DESTINATION");
    styles.font.draw_text(imgbuf, CAPTION_COLOR, 185, 32, 9.0, "TIME");

    draw_hline(imgbuf, 0, BOARD_WIDTH as i32, 45, 1, GRID_COLOR);
}

fn draw_departure_row(imgbuf: &mut image::RgbImage, styles: &Styles, row: &structs::DepartureRow, y: i32, tinted: bool) {
    if tinted {
        draw_band(imgbuf, y - 1, DEP_ROW_HEIGHT - 1, DEP_ROW_TINT);
    }

    let route_x = 8;
    let route_y = y + 8;

    let bar_color = parse_hex_color(&row.color).unwrap_or(DEP_FALLBACK_ROUTE_COLOR);
    imageproc::drawing::draw_filled_rect_mut(
        imgbuf,
        imageproc::rect::Rect::at(route_x, route_y - 2).of_size(4, 32),
        bar_color);

    let label_x = route_x + 4 + 6;
    let label = fit_to_width(&styles.font_bold, 30.0, &row.label, DEP_DESTINATION_X - label_x - 4);
    styles.font_bold.draw_text(imgbuf, WHITE, label_x, route_y, 30.0, &label);

    let dest_y = route_y + 1;
    styles.font.draw_text(
        imgbuf, DEP_DESTINATION_COLOR, DEP_DESTINATION_X, dest_y, 11.0, &destination_text(&row.destination));

    if !row.additional_times.is_empty() {
        let later: Vec<&str> = row.additional_times.iter().take(2).map(|t| t.as_str()).collect();
        styles.font.draw_text(
            imgbuf, DEP_LATER_TIMES_COLOR, DEP_DESTINATION_X, dest_y + 15, 11.0, &later.join(", "));
    }

    let time_color = if row.is_live { DEP_LIVE_COLOR } else { WHITE };
    let time_width = styles.font_bold.text_width(24.0, &row.time_text);
    let time_x = BOARD_WIDTH as i32 - time_width - 6;
    let time_y = route_y + 1;
    styles.font_bold.draw_text(imgbuf, time_color, time_x, time_y, 24.0, &row.time_text);

    if row.is_live {
        imageproc::drawing::draw_filled_circle_mut(imgbuf, (time_x - 7, time_y + 13), 3, DEP_LIVE_COLOR);
    }
}

pub fn generate_tasks_image(rows: &[structs::TaskRow], styles: &Styles) -> image::RgbImage {
    let mut imgbuf = image::RgbImage::from_pixel(BOARD_WIDTH, BOARD_HEIGHT, TASK_BG_COLOR);

    let active_count = rows.iter().filter(|t| !t.completed).count();
    let completed_count = rows.len() - active_count;

    styles.font_bold.draw_text(&mut imgbuf, TASK_ACCENT_COLOR, 12, 10, 16.0, "Today");
    let summary = if completed_count > 0 {
        format!("{} active \u{b7} {} completed", active_count, completed_count)
    } else {
        format!("{} tasks", active_count)
    };
    styles.font.draw_text(&mut imgbuf, CAPTION_COLOR, 12, 30, 10.0, &summary);

    draw_hline(&mut imgbuf, 0, BOARD_WIDTH as i32, 50, 1, GRID_COLOR);

    if rows.is_empty() {
        draw_centered_text(&mut imgbuf, &styles.font_bold, TASK_ACCENT_COLOR, 130, 13.0, "All done for today!");
        return imgbuf;
    }

    let shown = rows.len().min(structs::MAX_TASKS);
    for (i, task) in rows.iter().take(shown).enumerate() {
        let y = TASK_FIRST_ROW_Y + i as i32 * TASK_ROW_HEIGHT;
        draw_task_row(&mut imgbuf, styles, task, y, i % 2 == 1);

        if i + 1 < shown {
            draw_hline(&mut imgbuf, 12, 228, y + TASK_ROW_HEIGHT - 2, 1, GRID_COLOR);
        }
    }

    return imgbuf;
}

fn draw_task_row(imgbuf: &mut image::RgbImage, styles: &Styles, task: &structs::TaskRow, y: i32, tinted: bool) {
    if tinted {
        draw_band(imgbuf, y - 1, TASK_ROW_HEIGHT - 1, TASK_ROW_TINT);
    }

    let box_y = y + 2;
    let radius = TASK_CHECKBOX_SIZE / 2;
    let center = (TASK_CHECKBOX_X + radius, box_y + radius);

    if task.completed {
        imageproc::drawing::draw_filled_circle_mut(imgbuf, center, radius, TASK_COMPLETED_COLOR);
        draw_checkmark(imgbuf, TASK_CHECKBOX_X, box_y);
    } else {
        let color = priority_color(task.priority);
        imageproc::drawing::draw_hollow_circle_mut(imgbuf, center, radius, color);
        imageproc::drawing::draw_hollow_circle_mut(imgbuf, center, radius - 1, color);
    }

    let text = task_text(&task.content);
    let text_color = if task.completed { TASK_COMPLETED_COLOR } else { WHITE };
    styles.font.draw_text(imgbuf, text_color, TASK_CONTENT_X, box_y, 13.0, &text);

    if task.completed {
        let width = styles.font.text_width(13.0, &text);
        draw_hline(imgbuf, TASK_CONTENT_X, TASK_CONTENT_X + width, box_y + 8, 1, TASK_COMPLETED_COLOR);
    } else if !task.due_text.is_empty() {
        styles.font.draw_text(imgbuf, TASK_DUE_COLOR, TASK_CONTENT_X, box_y + 14, 10.0, &task.due_text);
    }
}

fn draw_checkmark(imgbuf: &mut image::RgbImage, x: i32, y: i32) {
    let points = [
        ((x + 4) as f32, (y + 8) as f32),
        ((x + 7) as f32, (y + 11) as f32),
        ((x + 12) as f32, (y + 5) as f32),
    ];
    for segment in points.windows(2) {
        let (start, end) = (segment[0], segment[1]);
        for offset in 0..2 {
            let dy = offset as f32;
            imageproc::drawing::draw_line_segment_mut(
                imgbuf, (start.0, start.1 + dy), (end.0, end.1 + dy), WHITE);
        }
    }
}

pub fn save_jpeg(imgbuf: &image::RgbImage, path: &std::path::Path) -> result::BoardResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    {
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
        encoder.encode(imgbuf.as_raw(), imgbuf.width(), imgbuf.height(), image::ColorType::Rgb8)?;
    }
    std::io::Write::flush(&mut writer)?;
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::{DepartureRow, TaskRow};
    use image::GenericImageView;

    fn departure(label: &str, destination: &str, time: &str, live: bool, later: &[&str]) -> DepartureRow {
        return DepartureRow {
            label: label.to_string(),
            destination: destination.to_string(),
            color: "#C8102E".to_string(),
            text_color: "#FFFFFF".to_string(),
            time_text: time.to_string(),
            is_live: live,
            additional_times: later.iter().map(|s| s.to_string()).collect(),
            sort_key: 0.0,
        };
    }

    fn count_pixels(img: &image::RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: image::Rgb<u8>) -> usize {
        let mut count = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                if *img.get_pixel(x, y) == color {
                    count += 1;
                }
            }
        }
        return count;
    }

    // Antialiased text only reaches its exact color inside thick strokes.
    fn count_near(img: &image::RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: image::Rgb<u8>) -> usize {
        let mut count = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = img.get_pixel(x, y);
                if p.0.iter().zip(color.0.iter()).all(|(a, b)| (*a as i32 - *b as i32).abs() <= 24) {
                    count += 1;
                }
            }
        }
        return count;
    }

    fn truetype_styles() -> Styles {
        let mut config = crate::config::Config::default();
        config.font_path = Some(std::path::PathBuf::from("testdata/DejaVuSans.ttf"));
        config.bold_font_path = None;

        let styles = Styles::load(&config);
        match (&styles.font, &styles.font_bold) {
            (Typeface::Outline(_), Typeface::Outline(_)) => {},
            other => panic!("expected outline fonts, got {:?}", other),
        }
        return styles;
    }

    fn all_styles() -> Vec<(&'static str, Styles)> {
        return vec![("bitmap", Styles::fallback()), ("truetype", truetype_styles())];
    }

    #[test]
    fn truncation() {
        assert_eq!("Centrum", destination_text("Centrum"));
        assert_eq!("Dw. Gdansk", destination_text("Dw. Gdansk"));
        assert_eq!("Dworzec Gd", destination_text("Dworzec Gd"));
        assert_eq!("Lotnisko C\u{2026}", destination_text("Lotnisko Chopina"));
        assert_eq!(11, destination_text("Lotnisko Chopina").chars().count());
        assert_eq!("Bródno-Pod\u{2026}", destination_text("Bródno-Podgrodzie"));

        let long_task = "Call the landlord about the broken radiator";
        assert_eq!("Call the landlord about...", task_text(long_task));
        assert_eq!(26, task_text(long_task).chars().count());
        let exactly = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(exactly, task_text(exactly));
    }

    #[test]
    fn default_output_names() {
        assert_eq!("departures.jpg", DEPARTURES_IMAGE);
        assert_eq!("todoist_today.jpg", TASKS_IMAGE);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(Some(image::Rgb([200, 16, 46])), parse_hex_color("#C8102E"));
        assert_eq!(Some(image::Rgb([255, 255, 255])), parse_hex_color("fff"));
        assert_eq!(None, parse_hex_color("#12345"));
        assert_eq!(None, parse_hex_color("orange"));
    }

    #[test]
    fn empty_departures_board() {
        for (name, styles) in all_styles() {
            let img = generate_departures_image(&[], "08:00", &styles);

            assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), img.dimensions());
            // Something is written in the body, not a blank frame.
            assert!(count_near(&img, 0, 100, 240, 160, CAPTION_COLOR) > 0, "{}", name);
        }
    }

    #[test]
    fn empty_tasks_board() {
        for (name, styles) in all_styles() {
            let img = generate_tasks_image(&[], &styles);

            assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), img.dimensions());
            assert!(count_near(&img, 0, 100, 240, 170, TASK_ACCENT_COLOR) > 0, "{}", name);
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let rows = vec![
            departure("128", "Dw. Centralny", "1 min", true, &[]),
            departure("N32", "Bródno-Podgrodzie", "08:15", false, &["08:30", "08:45"]),
        ];
        let tasks = vec![
            TaskRow::active("Pay rent".to_string(), 4, "Today".to_string()),
            TaskRow::completed("Morning run".to_string()),
        ];

        for (name, styles) in all_styles() {
            assert!(
                generate_departures_image(&rows, "08:00", &styles).into_raw() ==
                generate_departures_image(&rows, "08:00", &styles).into_raw(), "{}", name);
            assert!(
                generate_tasks_image(&tasks, &styles).into_raw() ==
                generate_tasks_image(&tasks, &styles).into_raw(), "{}", name);
        }
    }

    #[test]
    fn departure_rows_layout() {
        let rows = vec![
            departure("128", "Dw. Centralny", "1 min", true, &[]),
            departure("N32", "Bródno", "08:15", false, &["08:30"]),
        ];

        for (name, styles) in all_styles() {
            let img = generate_departures_image(&rows, "08:00", &styles);

            // Route color bar.
            assert_eq!(image::Rgb([200, 16, 46]), *img.get_pixel(9, 50 + 8 + 5), "{}", name);
            // Only the second band is tinted.
            assert_eq!(DEP_BG_COLOR, *img.get_pixel(2, 60), "{}", name);
            assert_eq!(DEP_ROW_TINT, *img.get_pixel(2, 97 + 10), "{}", name);
            // Separator after the first row but not after the last.
            assert_eq!(GRID_COLOR, *img.get_pixel(120, 50 + 47 - 2), "{}", name);
            assert_ne!(GRID_COLOR, *img.get_pixel(120, 97 + 47 - 2), "{}", name);

            // Live time is in the accent color, scheduled time is not.
            assert!(count_near(&img, 150, 58, 240, 95, DEP_LIVE_COLOR) > 0, "{}", name);
            assert_eq!(0, count_near(&img, 150, 105, 240, 142, DEP_LIVE_COLOR), "{}", name);
            assert!(count_near(&img, 150, 105, 240, 142, WHITE) > 0, "{}", name);
            // Later times only on the scheduled row.
            assert_eq!(0, count_near(&img, 80, 74, 150, 92, DEP_LATER_TIMES_COLOR), "{}", name);
            assert!(count_near(&img, 80, 121, 150, 139, DEP_LATER_TIMES_COLOR) > 0, "{}", name);
        }
    }

    #[test]
    fn long_route_label_stays_in_its_column() {
        let rows = vec![departure("EXPRESS-1234", "Centrum", "5 min", true, &[])];

        for (name, styles) in all_styles() {
            let img = generate_departures_image(&rows, "08:00", &styles);

            assert!(count_near(&img, 18, 58, 76, 95, WHITE) > 0, "{}", name);
            assert_eq!(0, count_near(&img, 76, 58, 80, 95, WHITE), "{}", name);
        }
    }

    #[test]
    fn header_clock_is_right_aligned() {
        for (name, styles) in all_styles() {
            let img = generate_departures_image(&[], "23:59", &styles);
            let width = styles.font_bold.text_width(16.0, "23:59") as u32;

            assert!(width > 0, "{}", name);
            assert!(count_near(&img, 240 - 8 - width, 0, 240 - 8, 28, CAPTION_COLOR) > 0, "{}", name);
            assert_eq!(0, count_near(&img, 240 - 8, 0, 240, 28, CAPTION_COLOR), "{}", name);
        }
    }

    #[test]
    fn task_rows_layout() {
        let tasks = vec![
            TaskRow::active("Pay rent".to_string(), 4, "Today".to_string()),
            TaskRow::completed("Morning run".to_string()),
        ];
        let (first, second) = (58, 58 + 30);

        for (name, styles) in all_styles() {
            let img = generate_tasks_image(&tasks, &styles);

            // Active: outline in the priority color, hollow middle.
            assert_eq!(priority_color(4), *img.get_pixel(12, first + 10), "{}", name);
            assert_eq!(TASK_BG_COLOR, *img.get_pixel(20, first + 10), "{}", name);
            // Completed: filled, muted.
            assert_eq!(TASK_COMPLETED_COLOR, *img.get_pixel(14, second + 10), "{}", name);

            // Strikethrough spans the completed text.
            let width = styles.font.text_width(13.0, "Morning run") as u32;
            let strike_y = second + 2 + 8;
            assert!(width > 0, "{}", name);
            assert_eq!(width as usize,
                       count_pixels(&img, 38, strike_y, 38 + width, strike_y + 1, TASK_COMPLETED_COLOR), "{}", name);

            // Due caption for the active task only.
            assert!(count_near(&img, 38, first + 18, 200, first + 26, TASK_DUE_COLOR) > 0, "{}", name);
            assert_eq!(0, count_near(&img, 38, second + 18, 200, second + 26, TASK_DUE_COLOR), "{}", name);

            // Second band tinted, no separator after the last row.
            assert_eq!(TASK_ROW_TINT, *img.get_pixel(2, second + 5), "{}", name);
            assert_eq!(GRID_COLOR, *img.get_pixel(100, first + 28), "{}", name);
            assert_ne!(GRID_COLOR, *img.get_pixel(100, second + 28), "{}", name);
        }
    }

    #[test]
    fn summary_caption() {
        for (name, styles) in all_styles() {
            let only_active = generate_tasks_image(
                &[TaskRow::active("a".to_string(), 1, "Today".to_string())], &styles);
            let mixed = generate_tasks_image(
                &[TaskRow::active("a".to_string(), 1, "Today".to_string()),
                  TaskRow::completed("b".to_string())], &styles);

            let short = count_near(&only_active, 12, 30, 240, 45, CAPTION_COLOR);
            let long = count_near(&mixed, 12, 30, 240, 45, CAPTION_COLOR);
            assert!(short > 0, "{}", name);
            assert!(long > short, "{}", name);
        }
    }

    #[test]
    fn jpeg_round_trip_dimensions() {
        let path = std::env::temp_dir().join(format!("infoboard-test-{}.jpg", std::process::id()));
        let img = generate_tasks_image(&[], &Styles::fallback());

        save_jpeg(&img, &path).expect("save jpeg");
        let reopened = image::open(&path).expect("open jpeg");
        let _ = std::fs::remove_file(&path);

        assert_eq!((240, 240), (reopened.width(), reopened.height()));
    }
}
