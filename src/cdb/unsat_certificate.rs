use {
    crate::types::*,
    std::{
        fs::File,
        io::{BufWriter, Write},
        path::PathBuf,
    },
};

/// Record of clause operations to build DRUP certifications.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CertifiedRecord {
    /// added a clause.
    Add,
    /// deleted a clause.
    Delete,
}

type Drup = Vec<(CertifiedRecord, Vec<i32>)>;

/// DRUP proof sink; writes to a file or keeps records on memory.
#[derive(Debug, Default)]
pub struct CertificationStore {
    /// clause history kept on memory
    queue: Option<Drup>,
    target: Option<PathBuf>,
    buffer: Option<BufWriter<File>>,
}

impl Clone for CertificationStore {
    fn clone(&self) -> Self {
        CertificationStore {
            queue: self.queue.clone(),
            target: None,
            buffer: None,
        }
    }
}

impl Instantiate for CertificationStore {
    fn instantiate(config: &Config, _cnf: &CNFDescription) -> Self {
        if !config.use_certification {
            return CertificationStore::default();
        }
        if config.cert_on_memory {
            return CertificationStore {
                queue: Some(Vec::new()),
                target: None,
                buffer: None,
            };
        }
        let cert: PathBuf = config.io_odir.join(&config.io_pfile);
        match File::create(&cert) {
            Ok(out) => CertificationStore {
                queue: None,
                buffer: Some(BufWriter::new(out)),
                target: Some(cert),
            },
            Err(e) => {
                log::warn!("failed to open {}: {e}", cert.display());
                CertificationStore::default()
            }
        }
    }
}

impl CertificationStore {
    pub fn is_active(&self) -> bool {
        self.buffer.is_some() || self.queue.is_some()
    }
    pub fn push_add(&mut self, vec: &[Lit]) {
        self.push(CertifiedRecord::Add, vec);
    }
    pub fn push_delete(&mut self, vec: &[Lit]) {
        self.push(CertifiedRecord::Delete, vec);
    }
    /// return the records kept on memory.
    pub fn records(&self) -> &[(CertifiedRecord, Vec<i32>)] {
        self.queue.as_deref().unwrap_or(&[])
    }
    pub fn close(&mut self) {
        if let Some(ref mut buf) = self.buffer {
            if buf.flush().is_err() {
                log::warn!("failed to flush the certificate");
            }
            self.buffer = None;
            if let Some(target) = self.target.take() {
                log::debug!("certificate written to {}", target.display());
            }
        }
    }
    fn push(&mut self, kind: CertifiedRecord, vec: &[Lit]) {
        if let Some(ref mut queue) = self.queue {
            queue.push((kind, i32s(vec)));
        }
        if let Some(ref mut buf) = self.buffer {
            if kind == CertifiedRecord::Delete && buf.write_all(b"d ").is_err() {
                self.buffer = None;
                return;
            }
            for l in vec {
                if buf
                    .write_all(format!("{} ", i32::from(*l)).as_bytes())
                    .is_err()
                {
                    self.buffer = None;
                    return;
                }
            }
            if buf.write_all(b"0\n").is_err() {
                self.buffer = None;
            }
        }
    }
}

impl Drop for CertificationStore {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_on_memory() {
        let config = Config::default().with_memory_certification();
        let mut cert = CertificationStore::instantiate(&config, &CNFDescription::default());
        assert!(cert.is_active());
        cert.push_add(&[Lit::from(-1i32), Lit::from(2i32)]);
        cert.push_delete(&[Lit::from(3i32)]);
        cert.push_add(&[]);
        assert_eq!(
            cert.records(),
            &[
                (CertifiedRecord::Add, vec![-1, 2]),
                (CertifiedRecord::Delete, vec![3]),
                (CertifiedRecord::Add, vec![]),
            ]
        );
    }
    #[test]
    fn test_inactive_store() {
        let mut cert =
            CertificationStore::instantiate(&Config::default(), &CNFDescription::default());
        assert!(!cert.is_active());
        cert.push_add(&[Lit::from(1i32)]);
        assert!(cert.records().is_empty());
    }
    #[test]
    fn test_clone_keeps_records_on_memory() {
        let config = Config::default().with_memory_certification();
        let mut cert = CertificationStore::instantiate(&config, &CNFDescription::default());
        cert.push_add(&[Lit::from(4i32)]);
        let mut copy = cert.clone();
        assert!(copy.is_active());
        copy.push_delete(&[Lit::from(4i32)]);
        assert_eq!(cert.records(), &[(CertifiedRecord::Add, vec![4])]);
        assert_eq!(
            copy.records(),
            &[
                (CertifiedRecord::Add, vec![4]),
                (CertifiedRecord::Delete, vec![4]),
            ]
        );
        drop(cert);
        assert_eq!(copy.records().len(), 2);
    }
}
