//! # Redis
//!
//! RAM database holding everything the read path needs at request time.
//!
//! ## Keys
//!
//! - `votos_totales:departamento:{departamento}`: hash, party id → running total for the department
//! - `votos_actuales:mesa:{id_mesa}`: hash, party id → live count for one precinct
//! - `log_auditoria`: stream of audit events, fields `user_id`, `accion`, `id_mesa`, `fecha_hora`, `partido_afectado`
//!
//! Counters are maintained with `HINCRBY` by the write path, so a field that was
//! never incremented simply does not exist. This side never writes.
use async_trait::async_trait;
use log::debug;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::collections::HashMap;

use crate::db::TallyStore;
use crate::error::Result;
use crate::models::{AuditEntry, Department};

pub const DEPARTMENT_TOTALS_PREFIX: &str = "votos_totales:departamento";
pub const PRECINCT_TOTALS_PREFIX: &str = "votos_actuales:mesa";
pub const AUDIT_STREAM: &str = "log_auditoria";

pub fn department_key(department: Department) -> String {
    format!("{DEPARTMENT_TOTALS_PREFIX}:{department}")
}

pub fn precinct_key(precinct_id: &str) -> String {
    format!("{PRECINCT_TOTALS_PREFIX}:{precinct_id}")
}

// XRANGE entries come back as (stream id, field map)
type StreamEntry = (String, HashMap<String, String>);

fn audit_entry_from_fields(mut fields: HashMap<String, String>) -> AuditEntry {
    AuditEntry {
        user_id: fields.remove("user_id").unwrap_or_default(),
        accion: fields.remove("accion").unwrap_or_default(),
        id_mesa: fields.remove("id_mesa").unwrap_or_default(),
        fecha_hora: fields.remove("fecha_hora").unwrap_or_default(),
        partido_afectado: fields.remove("partido_afectado"),
    }
}

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager().await?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl TallyStore for RedisStore {
    async fn department_totals(&self, department: Department, party_ids: &[String]) -> Result<Vec<Option<i64>>> {
        // HMGET with no fields is a syntax error on the server
        if party_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut connection = self.connection.clone();
        let totals: Vec<Option<i64>> = redis::cmd("HMGET")
            .arg(department_key(department))
            .arg(party_ids)
            .query_async(&mut connection)
            .await?;

        Ok(totals)
    }

    async fn precinct_totals(&self, precinct_id: &str) -> Result<HashMap<String, i64>> {
        let mut connection = self.connection.clone();
        let totals: HashMap<String, i64> = connection.hgetall(precinct_key(precinct_id)).await?;

        debug!("Precinct {} has counters for {} parties", precinct_id, totals.len());
        Ok(totals)
    }

    async fn audit_entries(&self, count: usize) -> Result<Vec<AuditEntry>> {
        let mut connection = self.connection.clone();
        let entries: Vec<StreamEntry> = connection.xrange_count(AUDIT_STREAM, "-", "+", count).await?;

        Ok(entries
            .into_iter()
            .map(|(_id, fields)| audit_entry_from_fields(fields))
            .collect())
    }
}
