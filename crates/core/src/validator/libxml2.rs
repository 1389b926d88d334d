//! Minimal safe wrapper over the libxml2 schema-validation API.
//!
//! Schema parsing is not thread-safe in libxml2 and happens once, at
//! construction. Validation contexts are created per call; libxml2 documents
//! validation against a shared schema pointer as thread-safe
//! (http://xmlsoft.org/threads.html), so the parsed schema is shared behind
//! an `Arc` and validation runs on blocking tasks without a lock.

use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, Once};

use libc::{c_char, c_int, c_void};

use super::error::ValidatorError;
use super::types::{Finding, Severity};

static LIBXML2_INIT: Once = Once::new();

// Opaque libxml2 structures
#[repr(C)]
pub struct XmlDoc {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchema {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchemaParserCtxt {
    _private: [u8; 0],
}

#[repr(C)]
pub struct XmlSchemaValidCtxt {
    _private: [u8; 0],
}

/// Mirrors libxml2's xmlError. Only `message`, `level` and `line` are read.
#[repr(C)]
pub struct XmlError {
    pub domain: c_int,
    pub code: c_int,
    pub message: *const c_char,
    pub level: c_int,
    pub file: *const c_char,
    pub line: c_int,
    pub str1: *const c_char,
    pub str2: *const c_char,
    pub str3: *const c_char,
    pub int1: c_int,
    pub int2: c_int,
    pub ctxt: *mut c_void,
    pub node: *mut c_void,
}

pub type XmlStructuredErrorFunc =
    Option<unsafe extern "C" fn(user_data: *mut c_void, error: *mut XmlError)>;

// Suppress libxml2's stderr reporting while parsing documents; failures are
// surfaced through the null return instead.
const XML_PARSE_NOERROR: c_int = 1 << 6;
const XML_PARSE_NOWARNING: c_int = 1 << 7;

#[cfg_attr(target_os = "windows", link(name = "libxml2"))]
#[cfg_attr(not(target_os = "windows"), link(name = "xml2"))]
extern "C" {
    fn xmlInitParser();

    // Document parsing
    fn xmlReadFile(url: *const c_char, encoding: *const c_char, options: c_int) -> *mut XmlDoc;
    fn xmlFreeDoc(doc: *mut XmlDoc);

    // Schema parsing
    fn xmlSchemaNewMemParserCtxt(buffer: *const c_char, size: c_int)
        -> *mut XmlSchemaParserCtxt;
    fn xmlSchemaParse(ctxt: *const XmlSchemaParserCtxt) -> *mut XmlSchema;
    fn xmlSchemaFreeParserCtxt(ctxt: *mut XmlSchemaParserCtxt);
    fn xmlSchemaFree(schema: *mut XmlSchema);

    // Schema validation
    fn xmlSchemaNewValidCtxt(schema: *const XmlSchema) -> *mut XmlSchemaValidCtxt;
    fn xmlSchemaFreeValidCtxt(ctxt: *mut XmlSchemaValidCtxt);
    fn xmlSchemaValidateDoc(ctxt: *const XmlSchemaValidCtxt, doc: *const XmlDoc) -> c_int;
    fn xmlSchemaSetValidStructuredErrors(
        ctxt: *mut XmlSchemaValidCtxt,
        serror: XmlStructuredErrorFunc,
        ctx: *mut c_void,
    );
}

/// Collects structured validation errors into findings, keeping libxml2's
/// warning/error classification.
unsafe extern "C" fn collect_finding(user_data: *mut c_void, error: *mut XmlError) {
    if error.is_null() {
        return;
    }
    let findings = unsafe { &mut *(user_data as *mut Vec<Finding>) };

    let message = unsafe {
        let ptr = (*error).message;
        if ptr.is_null() {
            return;
        }
        match CStr::from_ptr(ptr).to_str() {
            Ok(s) => s.trim().to_string(),
            Err(_) => return,
        }
    };

    // XML_ERR_WARNING is level 1; everything above is an error
    let (severity, line) = unsafe {
        let severity = if (*error).level <= 1 {
            Severity::Warning
        } else {
            Severity::Error
        };
        let line = if (*error).line > 0 {
            Some((*error).line as u32)
        } else {
            None
        };
        (severity, line)
    };

    findings.push(Finding {
        severity,
        message,
        line,
    });
}

/// Shared handle to a parsed schema, freed when the last clone drops.
#[derive(Debug, Clone)]
pub struct SchemaHandle {
    inner: Arc<SchemaInner>,
}

#[derive(Debug)]
struct SchemaInner {
    ptr: *mut XmlSchema,
    _phantom: PhantomData<XmlSchema>,
}

// Safety: parsed xmlSchema structures are read-only during validation and
// documented as safe to share across threads.
unsafe impl Send for SchemaInner {}
unsafe impl Sync for SchemaInner {}

impl Drop for SchemaInner {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe { xmlSchemaFree(self.ptr) };
            self.ptr = std::ptr::null_mut();
        }
    }
}

impl SchemaHandle {
    fn as_ptr(&self) -> *const XmlSchema {
        self.inner.ptr
    }
}

/// Owned parsed document, freed on drop.
struct DocGuard {
    ptr: *mut XmlDoc,
}

impl Drop for DocGuard {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe { xmlFreeDoc(self.ptr) };
        }
    }
}

fn init() {
    LIBXML2_INIT.call_once(|| unsafe {
        xmlInitParser();
    });
}

/// Parse an XSD schema from an in-memory buffer.
///
/// Not thread-safe; call once at startup.
pub fn parse_schema(schema_data: &[u8], origin: &Path) -> Result<SchemaHandle, ValidatorError> {
    init();
    unsafe {
        let parser_ctxt = xmlSchemaNewMemParserCtxt(
            schema_data.as_ptr() as *const c_char,
            schema_data.len() as c_int,
        );
        if parser_ctxt.is_null() {
            return Err(ValidatorError::SchemaParse {
                path: origin.to_path_buf(),
            });
        }

        let schema_ptr = xmlSchemaParse(parser_ctxt);
        xmlSchemaFreeParserCtxt(parser_ctxt);

        if schema_ptr.is_null() {
            return Err(ValidatorError::SchemaParse {
                path: origin.to_path_buf(),
            });
        }

        Ok(SchemaHandle {
            inner: Arc::new(SchemaInner {
                ptr: schema_ptr,
                _phantom: PhantomData,
            }),
        })
    }
}

/// Validate one document file against a parsed schema.
///
/// Returns the findings libxml2 reported, in document order. A return code
/// of zero with no error findings means the document conforms. Blocking;
/// callers offload to a blocking task.
pub fn validate_file(
    schema: &SchemaHandle,
    document: &Path,
) -> Result<Vec<Finding>, ValidatorError> {
    init();
    let path_str = document
        .to_str()
        .ok_or_else(|| ValidatorError::DocumentParse {
            path: document.to_path_buf(),
        })?;
    let c_path = CString::new(path_str).map_err(|_| ValidatorError::DocumentParse {
        path: document.to_path_buf(),
    })?;

    unsafe {
        let doc = xmlReadFile(
            c_path.as_ptr(),
            std::ptr::null(),
            XML_PARSE_NOERROR | XML_PARSE_NOWARNING,
        );
        if doc.is_null() {
            return Err(ValidatorError::DocumentParse {
                path: document.to_path_buf(),
            });
        }
        let doc = DocGuard { ptr: doc };

        let valid_ctxt = xmlSchemaNewValidCtxt(schema.as_ptr());
        if valid_ctxt.is_null() {
            return Err(ValidatorError::ContextCreation);
        }

        let mut findings: Vec<Finding> = Vec::new();
        xmlSchemaSetValidStructuredErrors(
            valid_ctxt,
            Some(collect_finding),
            &mut findings as *mut Vec<Finding> as *mut c_void,
        );

        let code = xmlSchemaValidateDoc(valid_ctxt, doc.ptr);
        xmlSchemaFreeValidCtxt(valid_ctxt);

        if code < 0 {
            return Err(ValidatorError::Internal { code });
        }

        // A nonzero code without a captured finding still means the document
        // does not conform; synthesize an error finding so callers never
        // treat it as success.
        if code > 0 && !findings.iter().any(Finding::is_error) {
            findings.push(Finding {
                severity: Severity::Error,
                message: format!("document does not conform to schema (code {})", code),
                line: None,
            });
        }

        Ok(findings)
    }
}
