extern crate anyhow;
extern crate chrono;
extern crate serde;
extern crate serde_json;

use anyhow::Context;
use crate::config;
use crate::fetch;
use crate::result;
use crate::structs;

#[derive(Deserialize, Debug, Default)]
pub struct CitymapperResponse {
    #[serde(default)]
    stops: Vec<CitymapperStop>,
}

#[derive(Deserialize, Debug, Default)]
struct CitymapperStop {
    #[serde(default)]
    services: Vec<CitymapperService>,
    #[serde(default)]
    routes: Vec<CitymapperRoute>,
}

#[derive(Deserialize, Debug)]
struct CitymapperService {
    route_id: Option<String>,
    headsign: Option<String>,
    live_departures_seconds: Option<Vec<f64>>,
    next_departures: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
struct CitymapperRoute {
    id: String,
    name: Option<String>,
    color: Option<String>,
    text_color: Option<String>,
}

pub fn get_departure_rows(config: &config::Config, now: chrono::DateTime<chrono::Utc>) -> Vec<structs::DepartureRow> {
    let timeout = config.timeout();
    return get_departure_rows_ext(config, now, &|request| fetch::real_fetch(request, timeout));
}

/// Fetch failures are logged and produce an empty board.
pub fn get_departure_rows_ext(
    config: &config::Config,
    now: chrono::DateTime<chrono::Utc>,
    fetch_fn: fetch::FetchFn) -> Vec<structs::DepartureRow> {
    match fetch_departures(config, fetch_fn) {
        Ok(response) => return process_departures(&response, now),
        Err(err) => {
            error!("Error fetching departures: {}", err);
            return vec![];
        },
    }
}

fn fetch_departures(config: &config::Config, fetch_fn: fetch::FetchFn) -> result::BoardResult<CitymapperResponse> {
    let request = fetch::FetchRequest {
        url: &config.departures_url,
        query: vec![
            ("headways", "1".to_string()),
            ("ids", config.stop_id.clone()),
            ("region_id", config.region_id.clone()),
        ],
        bearer_token: None,
    };

    let body = fetch_fn(&request)?;
    let response: CitymapperResponse = serde_json::from_str(&body)
        .context("while parsing departures json")?;
    return Ok(response);
}

/// RFC 3339, or ISO 8601 without seconds ("2024-01-01T08:15+01:00").
fn parse_departure_time(raw: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    let parsed = chrono::DateTime::parse_from_rfc3339(raw)
        .or_else(|_| chrono::DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z"));
    match parsed {
        Ok(time) => return Some(time),
        Err(err) => {
            warn!("Skipping unparseable departure time '{}': {}", raw, err);
            return None;
        },
    }
}

/// Clock time in the departure's own UTC offset, e.g. "08:15".
fn clock_text(time: &chrono::DateTime<chrono::FixedOffset>) -> String {
    return time.format("%H:%M").to_string();
}

pub fn process_departures(data: &CitymapperResponse, now: chrono::DateTime<chrono::Utc>) -> Vec<structs::DepartureRow> {
    let stop = match data.stops.first() {
        Some(stop) => stop,
        None => return vec![],
    };

    let routes: std::collections::HashMap<&str, &CitymapperRoute> = stop.routes.iter()
        .map(|r| (r.id.as_str(), r))
        .collect();

    let mut departures = vec![];
    for service in &stop.services {
        let route = service.route_id.as_deref().and_then(|id| routes.get(id));

        let label = route.and_then(|r| r.name.clone())
            .unwrap_or(structs::UNKNOWN_ROUTE_NAME.to_string());
        let color = route.and_then(|r| r.color.clone())
            .unwrap_or(structs::DEFAULT_ROUTE_COLOR.to_string());
        let text_color = route.and_then(|r| r.text_color.clone())
            .unwrap_or(structs::DEFAULT_ROUTE_TEXT_COLOR.to_string());
        let destination = service.headsign.clone().unwrap_or_default();

        let live = service.live_departures_seconds.as_ref().and_then(|s| s.first());
        let scheduled = service.next_departures.as_ref().filter(|s| !s.is_empty());

        let row = if let Some(&seconds) = live {
            structs::DepartureRow {
                label: label,
                destination: destination,
                color: color,
                text_color: text_color,
                time_text: format!("{} min", (seconds / 60.0).floor() as i64),
                is_live: true,
                additional_times: vec![],
                sort_key: seconds,
            }
        } else if let Some(times) = scheduled {
            let next = match parse_departure_time(&times[0]) {
                Some(next) => next,
                None => continue,
            };
            let additional_times = times.iter().skip(1).take(2)
                .filter_map(|t| parse_departure_time(t))
                .map(|t| clock_text(&t))
                .collect();
            let until = next.with_timezone(&chrono::Utc) - now;

            structs::DepartureRow {
                label: label,
                destination: destination,
                color: color,
                text_color: text_color,
                time_text: clock_text(&next),
                is_live: false,
                additional_times: additional_times,
                sort_key: until.num_milliseconds() as f64 / 1000.0,
            }
        } else {
            continue;
        };

        departures.push(row);
    }

    departures.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));
    departures.truncate(structs::MAX_DEPARTURES);

    return departures;
}
