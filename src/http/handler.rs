use std::future::Future;

use crate::http::request::Request;
use crate::http::response::ResponseWriter;

/// Application code invoked once per parsed request.
///
/// One handler is shared by every connection, so it must be safe to call
/// concurrently. It may read `req.body`; whatever it leaves unread is
/// discarded before the next request on the connection is parsed.
pub trait Handler: Send + Sync + 'static {
    fn serve(
        &self,
        w: &mut ResponseWriter,
        req: &mut Request<'_>,
    ) -> impl Future<Output = ()> + Send;
}
